//! Configuration threaded through every stage.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PathError, PathResult};

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// The X axis.
    #[default]
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Unit vector along the positive axis.
    #[must_use]
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Self::X => Vector3::x(),
            Self::Y => Vector3::y(),
            Self::Z => Vector3::z(),
        }
    }

    /// Component index of the axis (0, 1 or 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Direction in which rail points are offset from the path by the radius.
///
/// The rail is the thickness control curve of a sweep: the sweep scales its
/// profile by the distance between path and rail. A fixed axis reproduces
/// the convention of NeuronBuild for Cinema 4D (+X); the transport normal
/// keeps the rail perpendicular to the path everywhere, at the cost of
/// depending on the path's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RailOffset {
    /// Offset along a fixed world axis.
    Axis(Axis),
    /// Offset along the rotation-minimizing normal of the path.
    TransportNormal,
}

impl Default for RailOffset {
    fn default() -> Self {
        Self::Axis(Axis::X)
    }
}

/// What to do with a segment too short to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DegeneratePolicy {
    /// Drop the segment, log a warning and continue.
    #[default]
    Skip,
    /// Abort the whole file.
    Fail,
}

/// Settings for segmentation and geometry emission.
///
/// # Example
///
/// ```
/// use neuron_paths::{Axis, PathConfig};
///
/// let config = PathConfig::default()
///     .with_flip(false)
///     .with_profile_sides(4);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.flip_axis, Axis::Z);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Negate one axis of every emitted point.
    ///
    /// SWC data is right-handed; hosts such as Cinema 4D are left-handed.
    /// Default: `true`
    pub flip_handedness: bool,

    /// Axis negated by the handedness flip.
    ///
    /// Default: [`Axis::Z`]
    pub flip_axis: Axis,

    /// Emit a radius rail next to every segment path.
    ///
    /// Default: `true`
    pub generate_rail_paths: bool,

    /// Direction of the rail offset.
    ///
    /// Default: `RailOffset::Axis(Axis::X)`
    pub rail_offset: RailOffset,

    /// Sides of the sweep profile polygon.
    ///
    /// Not used by segmentation; handed to the surfacing stage.
    /// Default: `6`
    pub profile_sides: u8,

    /// Handling of segments with fewer than two points.
    ///
    /// Default: [`DegeneratePolicy::Skip`]
    pub degenerate: DegeneratePolicy,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            flip_handedness: true,
            flip_axis: Axis::Z,
            generate_rail_paths: true,
            rail_offset: RailOffset::default(),
            profile_sides: 6,
            degenerate: DegeneratePolicy::Skip,
        }
    }
}

impl PathConfig {
    /// Smallest accepted profile side count.
    pub const MIN_PROFILE_SIDES: u8 = 3;
    /// Largest accepted profile side count.
    pub const MAX_PROFILE_SIDES: u8 = 8;

    /// Set whether to flip handedness.
    #[must_use]
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip_handedness = flip;
        self
    }

    /// Set the axis negated by the handedness flip.
    #[must_use]
    pub fn with_flip_axis(mut self, axis: Axis) -> Self {
        self.flip_axis = axis;
        self
    }

    /// Set whether to emit rail paths.
    #[must_use]
    pub fn with_rails(mut self, rails: bool) -> Self {
        self.generate_rail_paths = rails;
        self
    }

    /// Set the rail offset direction.
    #[must_use]
    pub fn with_rail_offset(mut self, offset: RailOffset) -> Self {
        self.rail_offset = offset;
        self
    }

    /// Set the sweep profile side count.
    #[must_use]
    pub fn with_profile_sides(mut self, sides: u8) -> Self {
        self.profile_sides = sides;
        self
    }

    /// Set the degenerate segment policy.
    #[must_use]
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidConfig`] if `profile_sides` is outside
    /// `3..=8`.
    pub fn validate(&self) -> PathResult<()> {
        if !(Self::MIN_PROFILE_SIDES..=Self::MAX_PROFILE_SIDES).contains(&self.profile_sides) {
            return Err(PathError::invalid_config(format!(
                "profile_sides must be between {} and {}, got {}",
                Self::MIN_PROFILE_SIDES,
                Self::MAX_PROFILE_SIDES,
                self.profile_sides
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_host_convention() {
        let config = PathConfig::default();
        assert!(config.flip_handedness);
        assert_eq!(config.flip_axis, Axis::Z);
        assert!(config.generate_rail_paths);
        assert_eq!(config.rail_offset, RailOffset::Axis(Axis::X));
        assert_eq!(config.profile_sides, 6);
        assert_eq!(config.degenerate, DegeneratePolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn profile_sides_range() {
        for sides in 3..=8 {
            assert!(PathConfig::default().with_profile_sides(sides).validate().is_ok());
        }
        assert!(matches!(
            PathConfig::default().with_profile_sides(2).validate(),
            Err(PathError::InvalidConfig { .. })
        ));
        assert!(PathConfig::default().with_profile_sides(9).validate().is_err());
    }

    #[test]
    fn axis_units() {
        assert_eq!(Axis::X.unit(), Vector3::x());
        assert_eq!(Axis::Y.unit(), Vector3::y());
        assert_eq!(Axis::Z.index(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: PathConfig =
            serde_json::from_str(r#"{ "flip_handedness": false, "degenerate": "fail" }"#)
                .unwrap();
        assert!(!config.flip_handedness);
        assert_eq!(config.degenerate, DegeneratePolicy::Fail);
        assert_eq!(config.profile_sides, 6);
    }
}
