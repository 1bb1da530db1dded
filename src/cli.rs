//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{HeightMode, PlanetConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "planetscape")]
#[command(about = "Headless procedural planet terrain and environment simulator", long_about = None)]
pub struct Args {
    /// TOML config file (defaults are used for anything it leaves out)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Simulated time per frame (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Noise seed, overriding the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Height mode: closed-form (default), octaves
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Grid resolution in cells per side, overriding the config
    #[arg(long, value_name = "CELLS")]
    pub resolution: Option<u32>,

    /// Write the height field to a grayscale PNG
    #[arg(long, value_name = "PNG")]
    pub heightmap: Option<PathBuf>,

    /// Print one weather sample as JSON
    #[arg(long)]
    pub weather: bool,
}

impl Args {
    /// Parse height mode from command-line arguments
    pub fn parse_height_mode(&self) -> Option<HeightMode> {
        let mode = self.mode.as_deref()?;
        match mode.to_lowercase().as_str() {
            "closed-form" | "closed" => Some(HeightMode::ClosedForm),
            "octaves" | "noise" => Some(HeightMode::Octaves),
            other => {
                log::warn!("unknown height mode '{other}', using closed-form");
                Some(HeightMode::ClosedForm)
            }
        }
    }

    /// Load the config file (if any) and layer command-line overrides on top
    pub fn planet_config(&self) -> Result<PlanetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PlanetConfig::load(path)?,
            None => PlanetConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(resolution) = self.resolution {
            config.terrain.resolution = resolution;
        }
        if let Some(mode) = self.parse_height_mode() {
            config.terrain.mode = mode;
        }

        config.validate()?;
        Ok(config)
    }
}
