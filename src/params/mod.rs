//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (world units, seconds, degrees, °C, hPa, m/s)
//! - Documented ranges and meanings
//! - Defaults tuned for a 100-unit planet patch viewed from orbit

mod atmosphere;
mod camera;
mod environment;
mod terrain;
mod weather;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Re-export all types
pub use atmosphere::{validate_intensity, AtmosphereParams, INTENSITY_RANGE};
pub use camera::OrbitCameraParams;
pub use environment::EnvironmentParams;
pub use terrain::{
    HeightMode, NormalMode, TerrainSettings, HEIGHT_SCALE_SLIDER, MAX_OCTAVES, MAX_RESOLUTION,
    RESOLUTION_SLIDER, RESOLUTION_SLIDER_STEP,
};
pub use weather::WeatherParams;

/// Complete scene configuration, loadable from TOML
///
/// Missing tables and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Seed for the noise permutation table
    pub seed: u64,
    pub terrain: TerrainSettings,
    pub atmosphere: AtmosphereParams,
    pub environment: EnvironmentParams,
    pub camera: OrbitCameraParams,
    pub weather: WeatherParams,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            terrain: TerrainSettings::default(),
            atmosphere: AtmosphereParams::default(),
            environment: EnvironmentParams::default(),
            camera: OrbitCameraParams::default(),
            weather: WeatherParams::default(),
        }
    }
}

impl PlanetConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PlanetConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.terrain.validate()?;
        self.atmosphere.validate()?;
        self.environment.validate()?;
        self.camera.validate()?;
        self.weather.validate()?;
        Ok(())
    }
}
