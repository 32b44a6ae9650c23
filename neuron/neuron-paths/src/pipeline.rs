//! Whole-file pipeline: parse, index, partition, emit.
//!
//! Each stage consumes the complete output of the previous one, since
//! segment boundaries and anchors depend on every id in the file.

use std::path::Path;

use swc_io::{SwcDocument, TreeIndex, parse_swc, read_swc};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{DegeneratePolicy, PathConfig};
use crate::emit::{SegmentPath, emit_segment};
use crate::error::{PathError, PathResult};
use crate::partition::partition;
use crate::soma::{SomaPath, build_soma};

/// A segment dropped because it could not form a path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedSegment {
    /// Segment name.
    pub name: String,
    /// Position of the segment among all segments of the file.
    pub ordinal: usize,
    /// Points the path would have had.
    pub points: usize,
}

/// Everything emitted for one neuron.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronPaths {
    /// Soma outline, if the file has soma samples.
    pub soma: Option<SomaPath>,
    /// Segment paths in order of first appearance.
    pub segments: Vec<SegmentPath>,
    /// Segments dropped under [`DegeneratePolicy::Skip`].
    pub skipped: Vec<SkippedSegment>,
    /// Sweep profile side count, passed through from the configuration.
    pub profile_sides: u8,
}

impl NeuronPaths {
    /// Total number of emitted points over all segment paths.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(SegmentPath::len).sum()
    }

    /// Whether neither a soma nor any segment was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.soma.is_none() && self.segments.is_empty()
    }
}

/// Run segmentation and emission over a parsed document.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the tree index
/// rejects the samples, or a segment is degenerate under
/// [`DegeneratePolicy::Fail`]. Nothing is returned on error.
///
/// # Example
///
/// ```
/// use neuron_paths::{build_paths, PathConfig};
/// use swc_io::parse_swc;
///
/// let doc = parse_swc("\
/// 1 1 0 0 0 5 -1
/// 2 1 0 -5 0 5 1
/// 3 1 0 5 0 5 1
/// 4 3 0 -7 0 1 2
/// 5 3 0 -9 0 1 4
/// 6 4 0 7 0 2 3
/// 7 4 0 12 0 1.5 6
/// ").unwrap();
///
/// let paths = build_paths(&doc, &PathConfig::default()).unwrap();
/// assert_eq!(paths.soma.as_ref().map(|s| s.len()), Some(3));
/// assert_eq!(paths.segments.len(), 2);
/// assert_eq!(paths.segments[1].name, "Apical Dendrite 1");
/// ```
pub fn build_paths(doc: &SwcDocument, config: &PathConfig) -> PathResult<NeuronPaths> {
    config.validate()?;

    let index = TreeIndex::build(doc.samples())?;
    let segments = partition(doc.neurite_samples(), &index)?;

    let mut out = NeuronPaths {
        soma: build_soma(doc.soma_samples(), config),
        segments: Vec::with_capacity(segments.len()),
        skipped: Vec::new(),
        profile_sides: config.profile_sides,
    };

    for segment in &segments {
        match emit_segment(segment, config) {
            Ok(path) => out.segments.push(path),
            Err(PathError::DegenerateSegment { name, points })
                if config.degenerate == DegeneratePolicy::Skip =>
            {
                warn!(segment = %name, points, "skipping segment too short to sweep");
                out.skipped.push(SkippedSegment {
                    name,
                    ordinal: segment.ordinal(),
                    points,
                });
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        points = out.point_count(),
        skipped = out.skipped.len(),
        "emitted segment geometry"
    );
    Ok(out)
}

/// Parse SWC text and run the pipeline.
///
/// # Errors
///
/// Returns [`PathError::InvalidConfig`] before looking at `text`, the
/// parse errors of [`parse_swc`] or the errors of [`build_paths`].
pub fn build_paths_from_str(text: &str, config: &PathConfig) -> PathResult<NeuronPaths> {
    config.validate()?;
    let doc = parse_swc(text)?;
    build_paths(&doc, config)
}

/// Read an SWC file and run the pipeline.
///
/// # Errors
///
/// Returns [`PathError::InvalidConfig`] before opening the file, the read
/// errors of [`read_swc`] or the errors of [`build_paths`].
pub fn build_paths_from_file<P: AsRef<Path>>(
    path: P,
    config: &PathConfig,
) -> PathResult<NeuronPaths> {
    config.validate()?;
    let path = path.as_ref();
    let doc = read_swc(path)?;
    let paths = build_paths(&doc, config)?;
    info!(
        file = %path.display(),
        segments = paths.segments.len(),
        skipped = paths.skipped.len(),
        soma = paths.soma.is_some(),
        "built neuron paths"
    );
    Ok(paths)
}
