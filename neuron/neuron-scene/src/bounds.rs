//! Axis-aligned bounds of emitted geometry.

use nalgebra::{Point3, Vector3};
use neuron_paths::NeuronPaths;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use neuron_scene::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 4.0, 2.0));
/// assert_eq!(aabb.max_extent(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners, sorting each axis.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (inverted) AABB, the identity for expansion.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Bounds of every segment path point.
    ///
    /// Soma points and rails are not included: the volume grid is sized
    /// from the joined segment splines only.
    ///
    /// # Example
    ///
    /// ```
    /// use neuron_paths::{build_paths_from_str, PathConfig};
    /// use neuron_scene::Aabb;
    ///
    /// let paths = build_paths_from_str(
    ///     "1 1 0 0 0 50 -1\n2 3 0 10 0 1 1\n3 3 4 20 0 1 2\n",
    ///     &PathConfig::default(),
    /// )
    /// .unwrap();
    /// let aabb = Aabb::of_segments(&paths);
    /// assert_eq!(aabb.size().y, 20.0);
    /// assert_eq!(aabb.size().x, 4.0);
    /// ```
    #[must_use]
    pub fn of_segments(paths: &NeuronPaths) -> Self {
        Self::from_points(paths.segments.iter().flat_map(|s| s.path.iter()))
    }

    /// Check if the AABB is empty (min > max on some axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Width, height and depth.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the longest edge.
    #[inline]
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// Volume grid spacing that spans the longest edge in `divisions` cells.
    ///
    /// Returns `None` for empty or zero-size bounds, where no grid can be
    /// derived.
    #[must_use]
    pub fn voxel_size(&self, divisions: u32) -> Option<f64> {
        if self.is_empty() || divisions == 0 {
            return None;
        }
        let extent = self.max_extent();
        (extent > 0.0).then(|| extent / f64::from(divisions))
    }

    /// Expand the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aabb_from_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];
        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(4.0, 4.0, 1.5));
        assert_relative_eq!(aabb.max_extent(), 12.0);
    }

    #[test]
    fn new_sorts_corners() {
        let aabb = Aabb::new(Point3::new(5.0, 0.0, 1.0), Point3::new(0.0, 5.0, 0.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(5.0, 5.0, 1.0));
    }

    #[test]
    fn empty_aabb() {
        let aabb = Aabb::default();
        assert!(aabb.is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
        assert_eq!(aabb.voxel_size(200), None);
    }

    #[test]
    fn voxel_size_spans_longest_edge() {
        let aabb = Aabb::new(Point3::new(-100.0, 0.0, 0.0), Point3::new(100.0, 50.0, 10.0));
        assert_relative_eq!(aabb.voxel_size(200).unwrap(), 1.0);
        assert_relative_eq!(aabb.voxel_size(100).unwrap(), 2.0);
        assert_eq!(aabb.voxel_size(0), None);
    }

    #[test]
    fn degenerate_point_has_no_voxel_size() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let aabb = Aabb::from_points(std::iter::once(&p));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.voxel_size(200), None);
    }
}
