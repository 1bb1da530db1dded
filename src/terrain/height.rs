//! Height-field synthesis: closed-form trigonometric and multi-octave noise.

use ::noise::NoiseFn;

use crate::params::{HeightMode, TerrainSettings};
use crate::simplex::SimplexNoise2D;

/// Spatial frequency of the closed-form surface (radians per world unit)
const CLOSED_FORM_FREQUENCY: f32 = 0.1;

/// A pure mapping from planar coordinates to elevation
pub trait HeightField {
    /// Elevation at local plane coordinates (x, y), in world units
    fn height(&self, x: f32, y: f32, settings: &TerrainSettings) -> f32;
}

/// `height_scale · (sin(0.1x) + cos(0.1y))`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormHeight;

impl HeightField for ClosedFormHeight {
    fn height(&self, x: f32, y: f32, settings: &TerrainSettings) -> f32 {
        settings.height_scale
            * ((x * CLOSED_FORM_FREQUENCY).sin() + (y * CLOSED_FORM_FREQUENCY).cos())
    }
}

/// Fractal sum of noise octaves drawn from one shared source
///
/// Octave k samples at `noise_frequency · 2^k` with amplitude `0.5^k`; the sum
/// is scaled by `height_scale`.
#[derive(Debug, Clone)]
pub struct OctaveNoiseHeight<N = SimplexNoise2D> {
    noise: N,
}

impl<N: NoiseFn<f64, 2>> OctaveNoiseHeight<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    pub fn source(&self) -> &N {
        &self.noise
    }
}

impl<N: NoiseFn<f64, 2>> HeightField for OctaveNoiseHeight<N> {
    fn height(&self, x: f32, y: f32, settings: &TerrainSettings) -> f32 {
        let (x, y) = (x as f64, y as f64);
        let mut frequency = settings.noise_frequency as f64;
        let mut amplitude = 1.0;
        let mut total = 0.0;

        for _ in 0..settings.octave_count {
            total += amplitude * self.noise.get([x * frequency, y * frequency]);
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        (total * settings.height_scale as f64) as f32
    }
}

/// Both strategies behind one interface; `settings.mode` picks the active one
#[derive(Debug, Clone)]
pub struct HeightFieldSynthesizer<N = SimplexNoise2D> {
    closed_form: ClosedFormHeight,
    octaves: OctaveNoiseHeight<N>,
}

impl HeightFieldSynthesizer {
    /// Synthesizer backed by a seeded simplex generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimplexNoise2D::new(seed))
    }
}

impl<N: NoiseFn<f64, 2>> HeightFieldSynthesizer<N> {
    pub fn new(noise: N) -> Self {
        Self {
            closed_form: ClosedFormHeight,
            octaves: OctaveNoiseHeight::new(noise),
        }
    }

    /// Sample a `size × size` row-major height array spanning the world plane
    ///
    /// Rows run from +y to −y and columns from −x to +x, the same order the
    /// terrain mesh lays out its vertices.
    pub fn sample_grid(&self, settings: &TerrainSettings, size: usize) -> Vec<f32> {
        let half = settings.world_size / 2.0;
        let step = if size > 1 {
            settings.world_size / (size - 1) as f32
        } else {
            0.0
        };

        let mut heights = Vec::with_capacity(size * size);
        for row in 0..size {
            let y = half - row as f32 * step;
            for col in 0..size {
                let x = col as f32 * step - half;
                heights.push(self.height(x, y, settings));
            }
        }
        heights
    }
}

impl<N: NoiseFn<f64, 2>> HeightField for HeightFieldSynthesizer<N> {
    fn height(&self, x: f32, y: f32, settings: &TerrainSettings) -> f32 {
        match settings.mode {
            HeightMode::ClosedForm => self.closed_form.height(x, y, settings),
            HeightMode::Octaves => self.octaves.height(x, y, settings),
        }
    }
}

impl Default for HeightFieldSynthesizer {
    fn default() -> Self {
        Self::new(SimplexNoise2D::default())
    }
}
