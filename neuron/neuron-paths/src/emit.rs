//! Path and rail emission for segments.

use nalgebra::{Point3, Vector3};
use swc_io::SampleType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{PathConfig, RailOffset};
use crate::error::{PathError, PathResult};
use crate::handedness::to_host;
use crate::partition::Segment;
use crate::transport::transport_normals;

/// Fewest points a sweep path can have.
pub const MIN_PATH_POINTS: usize = 2;

/// Geometry of one segment, ready for a surfacing stage.
///
/// `path`, `radii` and `rail` (when present) are parallel: entry `i` of
/// each describes the same sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentPath {
    /// Segment name, e.g. `"Axon 3"`.
    pub name: String,
    /// Structure type of the segment.
    pub kind: SampleType,
    /// Position of the segment among all segments of the file.
    pub ordinal: usize,
    /// Center line, anchor first.
    pub path: Vec<Point3<f64>>,
    /// Radius at each path point.
    pub radii: Vec<f64>,
    /// Path offset by the radius at each point; drives the sweep thickness.
    pub rail: Option<Vec<Point3<f64>>>,
}

impl SegmentPath {
    /// Number of points on the center line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty (never true for an emitted segment).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Radius at the last point.
    #[must_use]
    pub fn end_radius(&self) -> f64 {
        self.radii.last().copied().unwrap_or(0.0)
    }

    /// Length of the center line.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.path.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Rail offsets (radius times direction) for unflipped points.
fn rail_offsets(points: &[Point3<f64>], radii: &[f64], offset: RailOffset) -> Vec<Vector3<f64>> {
    match offset {
        RailOffset::Axis(axis) => radii.iter().map(|r| axis.unit() * *r).collect(),
        RailOffset::TransportNormal => transport_normals(points)
            .into_iter()
            .zip(radii)
            .map(|(n, r)| n * *r)
            .collect(),
    }
}

/// Produce the path and rail of a segment.
///
/// The rail point of a sample is its position moved by its radius in the
/// configured direction. The handedness flip is applied after the offset,
/// to path and rail alike.
///
/// # Errors
///
/// Returns [`PathError::DegenerateSegment`] if the segment has fewer than
/// two points (a root sample whose children all start later segments).
///
/// # Example
///
/// ```
/// use neuron_paths::{emit_segment, partition, PathConfig};
/// use swc_io::{parse_swc, TreeIndex};
///
/// let doc = parse_swc("1 2 0 0 0 1 -1\n2 2 0 0 5 0.5 1\n").unwrap();
/// let index = TreeIndex::build(doc.samples()).unwrap();
/// let segments = partition(doc.neurite_samples(), &index).unwrap();
///
/// let out = emit_segment(&segments[0], &PathConfig::default()).unwrap();
/// assert_eq!(out.path.len(), 2);
/// // z is negated, the rail sits +radius along x
/// assert_eq!(out.path[1].z, -5.0);
/// assert_eq!(out.rail.unwrap()[1].x, 0.5);
/// ```
pub fn emit_segment(segment: &Segment, config: &PathConfig) -> PathResult<SegmentPath> {
    let points: Vec<Point3<f64>> = segment.samples().map(|s| s.position).collect();
    if points.len() < MIN_PATH_POINTS {
        return Err(PathError::DegenerateSegment {
            name: segment.name().to_string(),
            points: points.len(),
        });
    }
    let radii: Vec<f64> = segment.samples().map(|s| s.radius).collect();

    let rail = config.generate_rail_paths.then(|| {
        rail_offsets(&points, &radii, config.rail_offset)
            .into_iter()
            .zip(&points)
            .map(|(offset, p)| to_host(p + offset, config))
            .collect()
    });

    Ok(SegmentPath {
        name: segment.name().to_string(),
        kind: segment.kind(),
        ordinal: segment.ordinal(),
        path: points.into_iter().map(|p| to_host(p, config)).collect(),
        radii,
        rail,
    })
}
