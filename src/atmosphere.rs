//! Atmosphere shell rim-glow model.
//!
//! The glow is evaluated per surface point by the renderer; this module owns
//! the falloff formula and the intensity parameter it is scaled by.

use glam::Vec3;

use crate::error::ConfigError;
use crate::params::{validate_intensity, AtmosphereParams};

/// Offset subtracted from the normal/view cosine before the power
pub const RIM_OFFSET: f32 = 0.7;

/// Falloff exponent; even, so the base's sign never matters
pub const RIM_EXPONENT: i32 = 4;

/// View direction in view space (camera looks down −Z, so towards-viewer is +Z)
pub const VIEW_NORMAL: Vec3 = Vec3::Z;

/// Rim-lighting model for the transparent shell around the planet
#[derive(Debug, Clone, Default)]
pub struct AtmosphereShellModel {
    params: AtmosphereParams,
}

impl AtmosphereShellModel {
    pub fn new(params: AtmosphereParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Glow intensity for one surface point
    ///
    /// `(0.7 − n·v)⁴ · intensity`. Facing the viewer (n·v = 1) gives
    /// 0.0081·intensity; at the silhouette and beyond the value grows towards
    /// 8.3521·intensity (n·v = −1). Never negative for intensity ≥ 0.
    pub fn intensity_at(
        surface_normal: Vec3,
        view_normal: Vec3,
        params: &AtmosphereParams,
    ) -> f32 {
        let base = RIM_OFFSET - surface_normal.dot(view_normal);
        (base.powi(RIM_EXPONENT) * params.intensity).max(0.0)
    }

    /// Additive-blend RGBA for a view-space normal: tint with glow as alpha
    pub fn rim_color(&self, view_space_normal: Vec3) -> [f32; 4] {
        let [r, g, b] = self.params.color;
        let alpha = Self::intensity_at(view_space_normal, VIEW_NORMAL, &self.params);
        [r, g, b, alpha]
    }

    /// Update the intensity scalar; out-of-range values are rejected
    pub fn set_intensity(&mut self, value: f32) -> Result<(), ConfigError> {
        validate_intensity(value)?;
        self.params.intensity = value;
        Ok(())
    }

    pub fn intensity(&self) -> f32 {
        self.params.intensity
    }

    pub fn params(&self) -> &AtmosphereParams {
        &self.params
    }
}
