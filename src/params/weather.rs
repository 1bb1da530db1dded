//! Weather sampling ranges and broadcast cadence.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ranges and map sizes for the stochastic weather sampler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherParams {
    /// Surface temperature range (°C), rounded to 0.1
    pub temperature_range_c: (f32, f32),

    /// Surface pressure range (hPa), rounded to 0.01
    pub pressure_range_hpa: (f32, f32),

    /// Wind speed range (m/s), rounded to 0.1
    pub wind_speed_range_ms: (f32, f32),

    /// Temperature map side length (cells)
    pub temperature_map_size: usize,

    /// Wind map side length (cells)
    pub wind_map_size: usize,

    /// Interval between broadcast samples (seconds)
    pub broadcast_interval_s: f32,
}

impl Default for WeatherParams {
    fn default() -> Self {
        Self {
            temperature_range_c: (-30.0, 30.0),
            pressure_range_hpa: (5.0, 15.0),
            wind_speed_range_ms: (0.0, 10.0),
            temperature_map_size: 10,
            wind_map_size: 20,
            broadcast_interval_s: 60.0,
        }
    }
}

impl WeatherParams {
    /// Ranges must be finite and ordered; the interval finite and ≥ 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("temperature_range_c", self.temperature_range_c)?;
        check_range("pressure_range_hpa", self.pressure_range_hpa)?;
        check_range("wind_speed_range_ms", self.wind_speed_range_ms)?;

        let interval = self.broadcast_interval_s;
        if !(interval.is_finite() && interval >= 0.0) {
            return Err(ConfigError::InvalidBroadcastInterval(interval));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, (low, high): (f32, f32)) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, low, high })
    }
}
