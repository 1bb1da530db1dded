//! Atmosphere shell parameters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Accepted range for the atmosphere intensity scalar
pub const INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Parameters shared between the control surface and the shell model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereParams {
    /// Multiplier on the rim falloff (dimensionless, 0..=2)
    pub intensity: f32,

    /// Radius of the shell sphere (world units)
    pub shell_radius: f32,

    /// Longitude/latitude segments of the shell sphere
    pub shell_segments: u32,

    /// Linear RGB tint of the glow
    pub color: [f32; 3],
}

impl Default for AtmosphereParams {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            shell_radius: 60.0,
            shell_segments: 32,
            color: [0.3, 0.6, 1.0],
        }
    }
}

impl AtmosphereParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_intensity(self.intensity)
    }
}

/// Check an intensity value against [`INTENSITY_RANGE`]
pub fn validate_intensity(value: f32) -> Result<(), ConfigError> {
    if INTENSITY_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::IntensityOutOfRange(value))
    }
}
