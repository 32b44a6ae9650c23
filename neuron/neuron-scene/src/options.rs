//! Scene construction switches.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Which host objects to build around the segment splines.
///
/// The defaults match the NeuronBuild import dialog: sweeps inside a
/// connect object inside a subdivision surface, with joined component
/// splines, and no volume stage.
///
/// # Example
///
/// ```
/// use neuron_scene::SceneOptions;
///
/// let options = SceneOptions::default().with_volume(true);
/// assert!(options.volume_builder && options.volume_mesher);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneOptions {
    /// Wrap each spline in a sweep with an n-sided profile.
    pub sweep: bool,
    /// Put the group under a connect object (no welding).
    pub connect: bool,
    /// Put the result under a subdivision surface.
    pub subdivision: bool,
    /// Put the result under a volume builder.
    pub volume_builder: bool,
    /// Put the result under a volume mesher.
    pub volume_mesher: bool,
    /// Add joined multi-piece splines of all paths and all rails.
    pub single_spline: bool,
    /// Include the soma spline (and its sweep).
    pub include_soma: bool,
    /// Cells along the longest bounding-box edge of the volume grid.
    pub voxel_divisions: u32,
    /// Iso threshold of the volume mesher, in `(0, 1]`.
    pub mesher_threshold: f64,
    /// Phong smoothing angle of sweeps, in degrees.
    pub phong_angle: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            sweep: true,
            connect: true,
            subdivision: true,
            volume_builder: false,
            volume_mesher: false,
            single_spline: true,
            include_soma: true,
            voxel_divisions: 200,
            mesher_threshold: 0.6,
            phong_angle: 80.0,
        }
    }
}

impl SceneOptions {
    /// Set whether splines are swept.
    #[must_use]
    pub fn with_sweep(mut self, sweep: bool) -> Self {
        self.sweep = sweep;
        self
    }

    /// Set whether the connect wrapper is added.
    #[must_use]
    pub fn with_connect(mut self, connect: bool) -> Self {
        self.connect = connect;
        self
    }

    /// Set whether the subdivision wrapper is added.
    #[must_use]
    pub fn with_subdivision(mut self, subdivision: bool) -> Self {
        self.subdivision = subdivision;
        self
    }

    /// Enable or disable both volume stages.
    #[must_use]
    pub fn with_volume(mut self, volume: bool) -> Self {
        self.volume_builder = volume;
        self.volume_mesher = volume;
        self
    }

    /// Set whether joined component splines are added.
    #[must_use]
    pub fn with_single_spline(mut self, single: bool) -> Self {
        self.single_spline = single;
        self
    }

    /// Set whether the soma is part of the scene.
    #[must_use]
    pub fn with_soma(mut self, soma: bool) -> Self {
        self.include_soma = soma;
        self
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidOptions`] for zero voxel divisions or a
    /// mesher threshold outside `(0, 1]`.
    pub fn validate(&self) -> SceneResult<()> {
        if self.voxel_divisions == 0 {
            return Err(SceneError::invalid_options("voxel_divisions must be positive"));
        }
        if !(self.mesher_threshold > 0.0 && self.mesher_threshold <= 1.0) {
            return Err(SceneError::invalid_options(format!(
                "mesher_threshold must be in (0, 1], got {}",
                self.mesher_threshold
            )));
        }
        if !(0.0..=180.0).contains(&self.phong_angle) {
            return Err(SceneError::invalid_options(format!(
                "phong_angle must be in [0, 180], got {}",
                self.phong_angle
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
    fn dialog_defaults() {
        let options = SceneOptions::default();
        assert!(options.sweep && options.connect && options.subdivision);
        assert!(options.single_spline && options.include_soma);
        assert!(!options.volume_builder && !options.volume_mesher);
        assert_eq!(options.voxel_divisions, 200);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn out_of_range_values() {
        let mut options = SceneOptions::default();
        options.mesher_threshold = 0.0;
        assert!(matches!(options.validate(), Err(SceneError::InvalidOptions { .. })));

        let mut options = SceneOptions::default();
        options.voxel_divisions = 0;
        assert!(options.validate().is_err());

        let mut options = SceneOptions::default();
        options.phong_angle = f64::NAN;
        assert!(options.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let options: SceneOptions = serde_json::from_str(r#"{"sweep": false}"#).unwrap();
        assert!(!options.sweep);
        assert!(options.connect);
        assert_eq!(options.voxel_divisions, 200);
    }
}
