//! Configuration errors surfaced by terrain, atmosphere and config loading.

use std::fmt;

/// Invalid parameters or an unreadable configuration file.
///
/// Returned before any state is touched: a rejected call leaves the previous
/// mesh, atmosphere and clock exactly as they were.
#[derive(Debug)]
pub enum ConfigError {
    /// Terrain resolution of zero subdivisions
    ZeroResolution,
    /// Resolution above the largest grid the index buffer can address
    ResolutionTooLarge { found: u32, max: u32 },
    /// World size must be strictly positive (world units)
    NonPositiveWorldSize(f32),
    /// Height scale must be ≥ 0
    NegativeHeightScale(f32),
    /// Octave count outside `1..=max`
    InvalidOctaveCount { found: u32, max: u32 },
    /// Base noise frequency must be strictly positive
    NonPositiveFrequency(f32),
    /// Atmosphere intensity outside [0, 2]
    IntensityOutOfRange(f32),
    /// Weather sampling range that is non-finite or has low > high
    InvalidRange {
        field: &'static str,
        low: f32,
        high: f32,
    },
    /// Day–night angular frequency must be finite and > 0 (rad/s)
    NonPositiveAngularFrequency(f64),
    /// Broadcast interval must be finite and ≥ 0 (seconds)
    InvalidBroadcastInterval(f32),
    /// Camera parameter outside its usable range
    InvalidCameraParam { field: &'static str, value: f32 },
    /// In-place height update requested against a grid of another shape
    GridMismatch { expected: usize, found: usize },
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroResolution => write!(f, "terrain resolution must be at least 1"),
            ConfigError::ResolutionTooLarge { found, max } => {
                write!(f, "terrain resolution must be at most {max}, got {found}")
            }
            ConfigError::NonPositiveWorldSize(size) => {
                write!(f, "world size must be > 0, got {size}")
            }
            ConfigError::NegativeHeightScale(scale) => {
                write!(f, "height scale must be >= 0, got {scale}")
            }
            ConfigError::InvalidOctaveCount { found, max } => {
                write!(f, "octave count must be in 1..={max}, got {found}")
            }
            ConfigError::NonPositiveFrequency(freq) => {
                write!(f, "noise frequency must be > 0, got {freq}")
            }
            ConfigError::IntensityOutOfRange(value) => {
                write!(f, "atmosphere intensity must be in [0, 2], got {value}")
            }
            ConfigError::InvalidRange { field, low, high } => write!(
                f,
                "{field} must be a finite range with low <= high, got ({low}, {high})"
            ),
            ConfigError::NonPositiveAngularFrequency(omega) => {
                write!(f, "angular frequency must be finite and > 0, got {omega}")
            }
            ConfigError::InvalidBroadcastInterval(interval) => {
                write!(f, "broadcast interval must be finite and >= 0, got {interval}")
            }
            ConfigError::InvalidCameraParam { field, value } => {
                write!(f, "camera {field} out of range, got {value}")
            }
            ConfigError::GridMismatch { expected, found } => write!(
                f,
                "height update needs resolution {expected} to match the current grid, got {found}"
            ),
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
