//! Orbit camera configuration.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Orbit camera around the terrain centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraParams {
    /// Initial eye position (world units)
    pub position: [f32; 3],

    /// Point the camera orbits and looks at (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Fraction of pending rotation applied (and removed) per tick
    pub damping_factor: f32,

    /// Whether the camera spins around the target on its own
    pub auto_rotate: bool,

    /// Auto-rotation speed; 1.0 = one revolution per 60 s
    pub auto_rotate_speed: f32,

    /// Polar angle limit keeping the camera off the poles (radians)
    pub polar_epsilon: f32,
}

impl Default for OrbitCameraParams {
    fn default() -> Self {
        Self {
            position: [0.0, 50.0, 100.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            damping_factor: 0.05,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            polar_epsilon: 1e-6,
        }
    }
}

impl OrbitCameraParams {
    /// Reject values that would yield a degenerate projection or orbit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, value: f32| -> Result<(), ConfigError> {
            Err(ConfigError::InvalidCameraParam { field, value })
        };

        for (field, point) in [("position", self.position), ("target", self.target)] {
            if let Some(&value) = point.iter().find(|v| !v.is_finite()) {
                return invalid(field, value);
            }
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid("fov_degrees", self.fov_degrees);
        }
        if !(self.near_plane > 0.0 && self.near_plane.is_finite()) {
            return invalid("near_plane", self.near_plane);
        }
        if !(self.far_plane > self.near_plane && self.far_plane.is_finite()) {
            return invalid("far_plane", self.far_plane);
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return invalid("damping_factor", self.damping_factor);
        }
        if !self.auto_rotate_speed.is_finite() {
            return invalid("auto_rotate_speed", self.auto_rotate_speed);
        }
        if !(self.polar_epsilon >= 0.0 && self.polar_epsilon < FRAC_PI_2) {
            return invalid("polar_epsilon", self.polar_epsilon);
        }
        Ok(())
    }
}
