//! Rotation-minimizing normals along a path.
//!
//! Used to offset rail points perpendicular to the path when the rail is
//! not tied to a world axis.

use nalgebra::{Point3, Rotation3, Vector3};

/// Unit vector perpendicular to `v`, built from the world axis least
/// aligned with it.
fn perpendicular(v: Vector3<f64>) -> Vector3<f64> {
    let abs = v.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or(Vector3::y())
}

/// Tangent at each vertex: the averaged direction at interior vertices,
/// the edge direction at the ends. Zero-length edges inherit the previous
/// tangent.
fn tangents(points: &[Point3<f64>]) -> Vec<Vector3<f64>> {
    let n = points.len();
    let mut out: Vec<Vector3<f64>> = Vec::with_capacity(n);
    for i in 0..n {
        let incoming = (i > 0).then(|| points[i] - points[i - 1]);
        let outgoing = (i + 1 < n).then(|| points[i + 1] - points[i]);
        let raw = match (incoming, outgoing) {
            (Some(a), Some(b)) => a + b,
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => Vector3::zeros(),
        };
        let fallback = out.last().copied().unwrap_or(Vector3::z());
        out.push(raw.try_normalize(f64::EPSILON).unwrap_or(fallback));
    }
    out
}

/// Parallel-transport a normal along the path.
///
/// The first normal is perpendicular to the first tangent; each following
/// normal is the previous one rotated by the smallest rotation taking the
/// previous tangent to the current one, so the normals do not twist.
/// Returns an empty vector for fewer than two points.
///
/// # Example
///
/// ```
/// use neuron_paths::transport_normals;
/// use nalgebra::Point3;
///
/// let path = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(0.0, 1.0, 2.0),
/// ];
/// let normals = transport_normals(&path);
/// assert_eq!(normals.len(), 3);
/// assert!((normals[0].norm() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn transport_normals(points: &[Point3<f64>]) -> Vec<Vector3<f64>> {
    if points.len() < 2 {
        return Vec::new();
    }

    let tangents = tangents(points);
    let mut normals = Vec::with_capacity(points.len());
    normals.push(perpendicular(tangents[0]));

    for pair in tangents.windows(2) {
        let previous = normals[normals.len() - 1];
        let normal = match Rotation3::rotation_between(&pair[0], &pair[1]) {
            Some(rotation) => rotation * previous,
            // antiparallel tangents: the path doubles back
            None => -previous,
        };
        // re-orthogonalize against drift
        let normal = (normal - pair[1] * normal.dot(&pair[1]))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(|| perpendicular(pair[1]));
        normals.push(normal);
    }

    normals
}
