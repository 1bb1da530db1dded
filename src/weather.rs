//! Stochastic weather sampling and its broadcast cadence.
//!
//! Samples share no state with the terrain pipeline. Each call draws fresh
//! independent values; only the random source carries over between calls.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::params::WeatherParams;

/// One cell of the wind map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindCell {
    /// Wind speed (m/s), rounded to 0.1
    pub speed: f32,
    /// Direction the wind blows from (whole degrees, 0..360)
    pub direction: f32,
}

/// Point readings plus temperature and wind maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    #[serde(rename = "temperature")]
    pub temperature_c: f32,
    #[serde(rename = "pressure")]
    pub pressure_hpa: f32,
    #[serde(rename = "windSpeed")]
    pub wind_speed_ms: f32,
    /// Row-major temperature grid (°C)
    pub temperature_map: Vec<f32>,
    /// Row-major wind grid
    pub wind_map: Vec<WindCell>,
}

/// Maps only, without point readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherMap {
    pub temperature_map: Vec<f32>,
    pub wind_map: Vec<WindCell>,
}

/// Atmospheric composition by volume (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphereComposition {
    pub carbon_dioxide: f32,
    pub nitrogen: f32,
    pub argon: f32,
}

/// Fixed planetary statistics published alongside live weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetStatistics {
    /// Mean surface temperature (°C)
    pub average_temperature: f32,
    /// Tallest peak (km)
    pub highest_peak: f32,
    /// Deepest canyon (km)
    pub deepest_canyon: f32,
    pub atmosphere_composition: AtmosphereComposition,
}

impl PlanetStatistics {
    pub fn mars() -> Self {
        Self {
            average_temperature: -63.0,
            highest_peak: 21.9,
            deepest_canyon: 7.0,
            atmosphere_composition: AtmosphereComposition {
                carbon_dioxide: 95.32,
                nitrogen: 2.7,
                argon: 1.6,
            },
        }
    }
}

/// Random weather generator
pub struct WeatherSampler<R = ChaCha8Rng> {
    params: WeatherParams,
    rng: R,
}

impl WeatherSampler {
    /// Sampler seeded from OS entropy
    pub fn from_entropy(params: WeatherParams) -> Self {
        Self::with_rng(params, ChaCha8Rng::from_entropy())
    }

    /// Reproducible sampler
    pub fn seeded(params: WeatherParams, seed: u64) -> Self {
        Self::with_rng(params, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeatherSampler<R> {
    pub fn with_rng(params: WeatherParams, rng: R) -> Self {
        Self { params, rng }
    }

    pub fn params(&self) -> &WeatherParams {
        &self.params
    }

    /// Draw a complete sample
    pub fn sample(&mut self) -> WeatherSample {
        let p = self.params;
        let temperature_c = round_to(draw(&mut self.rng, p.temperature_range_c), 1);
        let pressure_hpa = round_to(draw(&mut self.rng, p.pressure_range_hpa), 2);
        let wind_speed_ms = round_to(draw(&mut self.rng, p.wind_speed_range_ms), 1);
        let WeatherMap {
            temperature_map,
            wind_map,
        } = self.sample_map();

        WeatherSample {
            temperature_c,
            pressure_hpa,
            wind_speed_ms,
            temperature_map,
            wind_map,
        }
    }

    /// Draw temperature and wind maps
    pub fn sample_map(&mut self) -> WeatherMap {
        let p = self.params;

        let temperature_map = (0..p.temperature_map_size.pow(2))
            .map(|_| round_to(draw(&mut self.rng, p.temperature_range_c), 1))
            .collect();

        let wind_map = (0..p.wind_map_size.pow(2))
            .map(|_| WindCell {
                speed: round_to(draw(&mut self.rng, p.wind_speed_range_ms), 1),
                direction: f32::from(self.rng.gen_range(0u16..360)),
            })
            .collect();

        WeatherMap {
            temperature_map,
            wind_map,
        }
    }
}

/// Uniform draw over an inclusive range given in either order
fn draw<R: Rng>(rng: &mut R, (a, b): (f32, f32)) -> f32 {
    rng.gen_range(a.min(b)..=a.max(b))
}

fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (value * scale).round() / scale
}

/// Rate limiter turning per-frame deltas into one event per interval
#[derive(Debug, Clone)]
pub struct WeatherSchedule {
    interval_s: f32,
    accumulated_s: f32,
}

impl WeatherSchedule {
    pub fn new(interval_s: f32) -> Self {
        Self {
            interval_s,
            accumulated_s: 0.0,
        }
    }

    /// Add a frame's elapsed time; true when a broadcast is due
    ///
    /// Fires at most once per call, however long the frame.
    pub fn advance(&mut self, delta_s: f32) -> bool {
        self.accumulated_s += delta_s.max(0.0);
        if self.accumulated_s < self.interval_s {
            return false;
        }
        self.accumulated_s = if self.interval_s > 0.0 {
            self.accumulated_s % self.interval_s
        } else {
            0.0
        };
        true
    }
}

/// Spawn a thread that sends a fresh sample every broadcast interval
///
/// The thread exits once the receiving end of `sender` is dropped.
pub fn spawn_weather_broadcast(
    params: WeatherParams,
    sender: Sender<WeatherSample>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        // Out-of-range intervals (rejected by config validation) never fire
        let interval = Duration::try_from_secs_f32(params.broadcast_interval_s.max(0.0))
            .unwrap_or(Duration::MAX);
        let mut sampler = WeatherSampler::from_entropy(params);

        loop {
            thread::sleep(interval);

            let sample = sampler.sample();
            log::debug!(
                "weather broadcast: {:.1} °C, {:.2} hPa, {:.1} m/s",
                sample.temperature_c,
                sample.pressure_hpa,
                sample.wind_speed_ms
            );
            if sender.send(sample).is_err() {
                log::info!("weather receiver dropped, stopping broadcast");
                break;
            }
        }
    })
}
