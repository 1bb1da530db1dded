//! Day–night cycle parameters.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment clock parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParams {
    /// Angular frequency ω of the light cycle (radians per second)
    pub angular_frequency_rad_s: f64,

    /// Whether the light intensity follows the cycle
    pub day_night_enabled: bool,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            angular_frequency_rad_s: 0.1,
            day_night_enabled: true,
        }
    }
}

impl EnvironmentParams {
    /// ω must be finite and strictly positive so the cycle has a period
    pub fn validate(&self) -> Result<(), ConfigError> {
        let omega = self.angular_frequency_rad_s;
        if omega.is_finite() && omega > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositiveAngularFrequency(omega))
        }
    }

    /// Length of one full day–night cycle (seconds), 2π/ω
    pub fn period_s(&self) -> f64 {
        TAU / self.angular_frequency_rad_s
    }
}
