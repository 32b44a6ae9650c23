//! Cell body outline.
//!
//! SWC soma encodings are not a reliable tree (the common three-point soma
//! has two children of the first point), so the soma samples are taken as
//! one open point sequence in file order, without segmentation.

use nalgebra::Point3;
use swc_io::Sample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PathConfig;
use crate::handedness::to_host;

/// Open point sequence outlining the soma.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SomaPath {
    /// Soma sample positions in file order.
    pub path: Vec<Point3<f64>>,
    /// Radius at each point.
    pub radii: Vec<f64>,
}

impl SomaPath {
    /// Number of soma points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Radius of the last soma sample, used for the sweep profile.
    #[must_use]
    pub fn profile_radius(&self) -> f64 {
        self.radii.last().copied().unwrap_or(0.0)
    }
}

/// Build the soma outline from soma samples.
///
/// Returns `None` when the file has no soma samples.
#[must_use]
pub fn build_soma(soma: &[Sample], config: &PathConfig) -> Option<SomaPath> {
    if soma.is_empty() {
        return None;
    }
    Some(SomaPath {
        path: soma.iter().map(|s| to_host(s.position, config)).collect(),
        radii: soma.iter().map(|s| s.radius).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use swc_io::parse_swc;

    #[test]
    fn three_point_soma() {
        let doc = parse_swc(
            "1 1 0 0 0 5 -1\n2 1 0 -5 1 5 1\n3 1 0 5 2 4 1\n4 3 0 -8 0 1 2\n",
        )
        .unwrap();
        let soma = build_soma(doc.soma_samples(), &PathConfig::default()).unwrap();
        assert_eq!(soma.len(), 3);
        assert_eq!(soma.path[1], Point3::new(0.0, -5.0, -1.0));
        assert_eq!(soma.path[2], Point3::new(0.0, 5.0, -2.0));
        assert_eq!(soma.profile_radius(), 4.0);
    }

    #[test]
    fn soma_ignores_id_contiguity() {
        // soma samples scattered through the file still form one path
        let doc = parse_swc(
            "1 1 0 0 0 5 -1\n2 3 0 1 0 1 1\n3 1 0 9 0 5 1\n4 1 9 9 0 5 -1\n",
        )
        .unwrap();
        let soma = build_soma(doc.soma_samples(), &PathConfig::default().with_flip(false)).unwrap();
        assert_eq!(soma.len(), 3);
        assert_eq!(soma.path[2], Point3::new(9.0, 9.0, 0.0));
    }

    #[test]
    fn no_soma_samples() {
        assert!(build_soma(&[], &PathConfig::default()).is_none());
    }
}
