//! Single-axis coordinate flip.

use nalgebra::Point3;

use crate::config::{Axis, PathConfig};

/// Negate one coordinate of a point.
///
/// Applying the flip twice returns the original point.
#[must_use]
pub fn flip_point(point: Point3<f64>, axis: Axis) -> Point3<f64> {
    let mut flipped = point;
    flipped[axis.index()] = -flipped[axis.index()];
    flipped
}

/// Apply the configured handedness convention to a point.
///
/// This is the identity when `flip_handedness` is off.
#[must_use]
pub fn to_host(point: Point3<f64>, config: &PathConfig) -> Point3<f64> {
    if config.flip_handedness {
        flip_point(point, config.flip_axis)
    } else {
        point
    }
}
