//! Day–night environment clock.

use crate::params::EnvironmentParams;

/// Whether the light intensity follows the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    /// Phase keeps advancing but the light holds its last value
    Paused,
}

/// Elapsed-time phase and the directional-light intensity derived from it
#[derive(Debug, Clone)]
pub struct EnvironmentClock {
    phase_s: f64,
    angular_frequency: f64,
    state: ClockState,
    light_intensity: f32,
}

impl EnvironmentClock {
    pub fn new(params: &EnvironmentParams) -> Self {
        let state = if params.day_night_enabled {
            ClockState::Running
        } else {
            ClockState::Paused
        };
        Self {
            phase_s: 0.0,
            angular_frequency: params.angular_frequency_rad_s,
            state,
            light_intensity: light_at(0.0, params.angular_frequency_rad_s),
        }
    }

    /// Advance by a caller-measured frame time and return the light intensity
    ///
    /// Negative or NaN deltas count as zero so the phase never runs backwards.
    pub fn tick(&mut self, delta_s: f32) -> f32 {
        self.phase_s += f64::from(delta_s.max(0.0));
        if self.state == ClockState::Running {
            self.light_intensity = light_at(self.phase_s, self.angular_frequency);
        }
        self.light_intensity
    }

    pub fn set_day_night_enabled(&mut self, enabled: bool) {
        self.state = if enabled {
            ClockState::Running
        } else {
            ClockState::Paused
        };
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Total elapsed time (seconds)
    pub fn elapsed_s(&self) -> f64 {
        self.phase_s
    }

    /// Light intensity in [0, 1] as of the last tick
    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }
}

/// `(sin(phase · ω) + 1) / 2`
pub fn light_at(phase_s: f64, angular_frequency: f64) -> f32 {
    (((phase_s * angular_frequency).sin() + 1.0) / 2.0) as f32
}
