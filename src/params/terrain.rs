//! Terrain height-field and mesh parameters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest octave count the multi-octave synthesizer accepts
pub const MAX_OCTAVES: u32 = 4;

/// Largest accepted grid resolution
///
/// Keeps (resolution + 1)² vertex indices well inside `u32`.
pub const MAX_RESOLUTION: u32 = 4096;

/// Control-surface slider bounds for grid resolution (subdivisions per side)
pub const RESOLUTION_SLIDER: RangeInclusive<u32> = 16..=256;

/// Control-surface slider step for grid resolution
pub const RESOLUTION_SLIDER_STEP: u32 = 16;

/// Control-surface slider bounds for height scale (world units)
pub const HEIGHT_SCALE_SLIDER: RangeInclusive<f32> = 0.0..=20.0;

/// How heights are derived from planar coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightMode {
    /// `height_scale · (sin(0.1x) + cos(0.1y))`
    #[default]
    ClosedForm,
    /// Sum of simplex octaves, amplitude halving and frequency doubling
    Octaves,
}

/// How vertex normals are derived from the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalMode {
    /// Area-weighted average of adjacent face normals
    #[default]
    Smooth,
    /// One normal per triangle face
    Flat,
}

/// Terrain synthesis parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Grid subdivisions per side ((resolution + 1)² vertices)
    pub resolution: u32,

    /// Edge length of the square terrain plane (world units)
    pub world_size: f32,

    /// Vertical scale applied to the height function (world units)
    pub height_scale: f32,

    /// Number of noise octaves summed in `HeightMode::Octaves`
    pub octave_count: u32,

    /// Frequency of the first octave (cycles per world unit)
    pub noise_frequency: f32,

    /// Active height strategy
    pub mode: HeightMode,

    /// Active normal strategy
    pub normal_mode: NormalMode,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            resolution: 128,
            world_size: 100.0,
            height_scale: 10.0,
            octave_count: MAX_OCTAVES,
            noise_frequency: 0.05,
            mode: HeightMode::ClosedForm,
            normal_mode: NormalMode::Smooth,
        }
    }
}

impl TerrainSettings {
    /// Reject settings that cannot produce a valid grid.
    ///
    /// Values are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionTooLarge {
                found: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        if !(self.world_size > 0.0) {
            return Err(ConfigError::NonPositiveWorldSize(self.world_size));
        }
        if !(self.height_scale >= 0.0) {
            return Err(ConfigError::NegativeHeightScale(self.height_scale));
        }
        if self.octave_count == 0 || self.octave_count > MAX_OCTAVES {
            return Err(ConfigError::InvalidOctaveCount {
                found: self.octave_count,
                max: MAX_OCTAVES,
            });
        }
        if !(self.noise_frequency > 0.0) {
            return Err(ConfigError::NonPositiveFrequency(self.noise_frequency));
        }
        Ok(())
    }

    /// Vertices per grid side
    pub fn vertices_per_side(&self) -> usize {
        self.resolution as usize + 1
    }

    /// Total vertex count, (resolution + 1)²
    pub fn vertex_count(&self) -> usize {
        self.vertices_per_side().pow(2)
    }

    /// Distance between neighbouring vertices (world units)
    pub fn cell_size(&self) -> f32 {
        self.world_size / self.resolution as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(resolution: u32, world_size: f32, height_scale: f32, octaves: u32) -> TerrainSettings {
        TerrainSettings {
            resolution,
            world_size,
            height_scale,
            octave_count: octaves,
            ..TerrainSettings::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            settings(0, 100.0, 5.0, 1).validate(),
            Err(ConfigError::ZeroResolution)
        ));
        assert!(matches!(
            settings(8, 0.0, 5.0, 1).validate(),
            Err(ConfigError::NonPositiveWorldSize(_))
        ));
        assert!(matches!(
            settings(8, f32::NAN, 5.0, 1).validate(),
            Err(ConfigError::NonPositiveWorldSize(_))
        ));
        assert!(matches!(
            settings(8, 100.0, -1.0, 1).validate(),
            Err(ConfigError::NegativeHeightScale(_))
        ));
        assert!(matches!(
            settings(8, 100.0, 5.0, 0).validate(),
            Err(ConfigError::InvalidOctaveCount { found: 0, .. })
        ));
        assert!(matches!(
            settings(8, 100.0, 5.0, MAX_OCTAVES + 1).validate(),
            Err(ConfigError::InvalidOctaveCount { .. })
        ));
    }

    #[test]
    fn test_resolution_cap() {
        assert!(settings(MAX_RESOLUTION, 100.0, 5.0, 1).validate().is_ok());
        assert!(matches!(
            settings(MAX_RESOLUTION + 1, 100.0, 5.0, 1).validate(),
            Err(ConfigError::ResolutionTooLarge { .. })
        ));
        assert!(matches!(
            settings(u32::MAX, 100.0, 5.0, 1).validate(),
            Err(ConfigError::ResolutionTooLarge { found: u32::MAX, .. })
        ));
        // Largest index still fits the u32 index buffer
        let max = settings(MAX_RESOLUTION, 100.0, 5.0, 1);
        assert!(max.vertex_count() <= u32::MAX as usize);
    }

    #[test]
    fn test_zero_height_scale_is_flat_not_invalid() {
        assert!(settings(8, 100.0, 0.0, 1).validate().is_ok());
    }

    #[test]
    fn test_grid_dimensions() {
        let s = settings(4, 100.0, 1.0, 1);
        assert_eq!(s.vertices_per_side(), 5);
        assert_eq!(s.vertex_count(), 25);
        assert_eq!(s.cell_size(), 25.0);
    }

    #[test]
    fn test_slider_bounds_are_valid_settings() {
        for resolution in RESOLUTION_SLIDER.step_by(RESOLUTION_SLIDER_STEP as usize) {
            assert!(settings(resolution, 100.0, *HEIGHT_SCALE_SLIDER.end(), 1)
                .validate()
                .is_ok());
        }
    }
}
