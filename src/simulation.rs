//! Per-frame driver tying the clock, camera, terrain and atmosphere together.
//!
//! The host owns the frame loop and calls [`SimulationLoop::tick`] once per
//! presented frame with its measured elapsed time. Parameter edits arrive as
//! plain value updates, either applied synchronously or posted from any
//! thread through a [`ControlHandle`] and picked up at the start of the next
//! tick.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use glam::{Mat4, Vec3};

use crate::atmosphere::AtmosphereShellModel;
use crate::camera::OrbitCamera;
use crate::environment::EnvironmentClock;
use crate::error::ConfigError;
use crate::params::{HeightMode, NormalMode, PlanetConfig, TerrainSettings};
use crate::terrain::{HeightFieldSynthesizer, TerrainMesh};
use crate::weather::{WeatherSample, WeatherSampler, WeatherSchedule};

/// A single control-surface edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlUpdate {
    Resolution(u32),
    WorldSize(f32),
    HeightScale(f32),
    OctaveCount(u32),
    HeightMode(HeightMode),
    NormalMode(NormalMode),
    AtmosphereIntensity(f32),
    DayNightEnabled(bool),
    AutoRotateEnabled(bool),
}

impl ControlUpdate {
    /// Settings after this edit, or `None` for non-terrain edits
    fn edit_terrain(self, settings: &TerrainSettings) -> Option<TerrainSettings> {
        let mut next = *settings;
        match self {
            ControlUpdate::Resolution(v) => next.resolution = v,
            ControlUpdate::WorldSize(v) => next.world_size = v,
            ControlUpdate::HeightScale(v) => next.height_scale = v,
            ControlUpdate::OctaveCount(v) => next.octave_count = v,
            ControlUpdate::HeightMode(v) => next.mode = v,
            ControlUpdate::NormalMode(v) => next.normal_mode = v,
            _ => return None,
        }
        Some(next)
    }
}

/// Cloneable sender for posting edits from a control surface
#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: Sender<ControlUpdate>,
}

impl ControlHandle {
    /// Queue an edit for the next tick; false if the loop is gone
    pub fn send(&self, update: ControlUpdate) -> bool {
        self.sender.send(update).is_ok()
    }
}

/// Everything the renderer needs after one tick
#[derive(Debug)]
pub struct FrameState {
    /// Total simulated time (seconds)
    pub elapsed_s: f64,
    /// Directional light intensity in [0, 1]
    pub light_intensity: f32,
    pub atmosphere_intensity: f32,
    pub camera_eye: Vec3,
    pub view_proj: Mat4,
    /// Changes whenever the terrain buffers need re-uploading
    pub terrain_revision: u64,
    /// Present on ticks where a weather broadcast is due
    pub weather: Option<WeatherSample>,
    /// Queued edits that failed validation this tick
    pub rejected: Vec<ConfigError>,
}

/// Tick-driven environment simulation
pub struct SimulationLoop {
    terrain: TerrainMesh,
    atmosphere: AtmosphereShellModel,
    clock: EnvironmentClock,
    camera: OrbitCamera,
    weather: Option<(WeatherSampler, WeatherSchedule)>,
    aspect_ratio: f32,
    sender: Sender<ControlUpdate>,
    updates: Receiver<ControlUpdate>,
}

impl SimulationLoop {
    /// Build every subsystem from a validated config
    pub fn new(config: &PlanetConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let synthesizer = HeightFieldSynthesizer::with_seed(config.seed);
        let terrain = TerrainMesh::new(synthesizer, &config.terrain)?;
        let atmosphere = AtmosphereShellModel::new(config.atmosphere)?;
        let (sender, updates) = mpsc::channel();

        log::info!(
            "simulation ready: {}×{} terrain ({:?}), seed {}",
            config.terrain.resolution,
            config.terrain.resolution,
            config.terrain.mode,
            config.seed
        );

        Ok(Self {
            terrain,
            atmosphere,
            clock: EnvironmentClock::new(&config.environment),
            camera: OrbitCamera::new(config.camera),
            weather: None,
            aspect_ratio: 16.0 / 9.0,
            sender,
            updates,
        })
    }

    /// Emit a weather sample through `FrameState::weather` once per broadcast interval
    pub fn with_weather(mut self, sampler: WeatherSampler) -> Self {
        let schedule = WeatherSchedule::new(sampler.params().broadcast_interval_s);
        self.weather = Some((sampler, schedule));
        self
    }

    /// Sender for edits posted from other threads
    pub fn control_handle(&self) -> ControlHandle {
        ControlHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Apply one edit immediately
    pub fn apply(&mut self, update: ControlUpdate) -> Result<(), ConfigError> {
        match update.edit_terrain(self.terrain.settings()) {
            Some(next) => self.apply_terrain(&next),
            None => self.apply_environment(update),
        }
    }

    fn apply_environment(&mut self, update: ControlUpdate) -> Result<(), ConfigError> {
        match update {
            ControlUpdate::AtmosphereIntensity(v) => self.atmosphere.set_intensity(v)?,
            ControlUpdate::DayNightEnabled(v) => self.clock.set_day_night_enabled(v),
            ControlUpdate::AutoRotateEnabled(v) => self.camera.set_auto_rotate(v),
            _ => {}
        }
        Ok(())
    }

    /// Regenerate on a resolution change, otherwise update heights in place
    fn apply_terrain(&mut self, next: &TerrainSettings) -> Result<(), ConfigError> {
        let current = self.terrain.settings();
        if next == current {
            return Ok(());
        }
        if next.resolution != current.resolution {
            self.terrain.regenerate(next)
        } else {
            self.terrain.update_heights(next)
        }
    }

    /// Drain queued edits, folding terrain edits into a single rebuild
    fn drain_updates(&mut self) -> Vec<ConfigError> {
        let mut rejected = Vec::new();
        let mut pending = *self.terrain.settings();

        loop {
            let update = match self.updates.try_recv() {
                Ok(update) => update,
                // The loop holds a sender itself, so disconnection cannot happen
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };

            let result = match update.edit_terrain(&pending) {
                Some(next) => next.validate().map(|()| pending = next),
                None => self.apply_environment(update),
            };
            if let Err(e) = result {
                log::warn!("rejected {update:?}: {e}");
                rejected.push(e);
            }
        }

        if let Err(e) = self.apply_terrain(&pending) {
            log::warn!("terrain rebuild failed: {e}");
            rejected.push(e);
        }
        rejected
    }

    /// Advance one frame by the host-measured `delta_s` seconds
    pub fn tick(&mut self, delta_s: f32) -> FrameState {
        let rejected = self.drain_updates();

        let light_intensity = self.clock.tick(delta_s);
        self.camera.update(delta_s);
        let (view_proj, camera_eye) = self.camera.view_proj(self.aspect_ratio);

        let weather = match &mut self.weather {
            Some((sampler, schedule)) => schedule.advance(delta_s).then(|| sampler.sample()),
            None => None,
        };

        FrameState {
            elapsed_s: self.clock.elapsed_s(),
            light_intensity,
            atmosphere_intensity: self.atmosphere.intensity(),
            camera_eye,
            view_proj,
            terrain_revision: self.terrain.revision(),
            weather,
            rejected,
        }
    }

    pub fn terrain(&self) -> &TerrainMesh {
        &self.terrain
    }

    pub fn atmosphere(&self) -> &AtmosphereShellModel {
        &self.atmosphere
    }

    pub fn clock(&self) -> &EnvironmentClock {
        &self.clock
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::ClockState;
    use crate::params::WeatherParams;
    use std::thread;

    fn small_config() -> PlanetConfig {
        let mut config = PlanetConfig::default();
        config.terrain.resolution = 16;
        config
    }

    fn simulation() -> SimulationLoop {
        SimulationLoop::new(&small_config()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = small_config();
        config.terrain.resolution = 0;
        assert!(matches!(
            SimulationLoop::new(&config),
            Err(ConfigError::ZeroResolution)
        ));
    }

    #[test]
    fn test_tick_follows_day_night_cycle() {
        let mut sim = simulation();
        let frame = sim.tick(5.0);
        let expected = ((5.0_f64 * 0.1).sin() + 1.0) / 2.0;
        assert!((frame.light_intensity as f64 - expected).abs() < 1e-6);
        assert_eq!(frame.elapsed_s, 5.0);
        assert!(frame.rejected.is_empty());
        assert!(frame.weather.is_none());
    }

    #[test]
    fn test_resolution_edit_regenerates_next_tick() {
        let mut sim = simulation();
        let handle = sim.control_handle();
        let revision = sim.terrain().revision();

        assert!(handle.send(ControlUpdate::Resolution(32)));
        assert_eq!(sim.terrain().settings().resolution, 16, "not before the tick");

        let frame = sim.tick(0.016);
        assert_eq!(sim.terrain().settings().resolution, 32);
        assert_eq!(sim.terrain().positions().len(), 33 * 33);
        assert!(frame.terrain_revision > revision);
    }

    #[test]
    fn test_height_edits_coalesce() {
        let mut sim = simulation();
        let handle = sim.control_handle();
        let revision = sim.terrain().revision();

        for h in [2.0, 4.0, 6.0, 8.0] {
            handle.send(ControlUpdate::HeightScale(h));
        }
        let frame = sim.tick(0.016);

        assert_eq!(frame.terrain_revision, revision + 1);
        assert_eq!(sim.terrain().settings().height_scale, 8.0);
        // Centre vertex of the 17×17 grid sits on the origin
        assert_eq!(sim.terrain().positions()[8 * 17 + 8].z, 8.0);
    }

    #[test]
    fn test_unchanged_settings_skip_rebuild() {
        let mut sim = simulation();
        let revision = sim.terrain().revision();
        sim.control_handle().send(ControlUpdate::HeightScale(10.0));
        let frame = sim.tick(0.016);
        assert_eq!(frame.terrain_revision, revision);
    }

    #[test]
    fn test_invalid_edit_is_reported_and_ignored() {
        let mut sim = simulation();
        let handle = sim.control_handle();
        let before = sim.terrain().grid().clone();

        handle.send(ControlUpdate::Resolution(0));
        handle.send(ControlUpdate::AtmosphereIntensity(5.0));
        let frame = sim.tick(0.016);

        assert_eq!(frame.rejected.len(), 2);
        assert!(matches!(frame.rejected[0], ConfigError::ZeroResolution));
        assert!(matches!(
            frame.rejected[1],
            ConfigError::IntensityOutOfRange(_)
        ));
        assert_eq!(*sim.terrain().grid(), before);
        assert_eq!(frame.atmosphere_intensity, 1.0);
    }

    #[test]
    fn test_valid_edits_survive_invalid_neighbours() {
        let mut sim = simulation();
        let handle = sim.control_handle();

        handle.send(ControlUpdate::HeightScale(3.0));
        handle.send(ControlUpdate::OctaveCount(99));
        handle.send(ControlUpdate::HeightMode(HeightMode::Octaves));
        let frame = sim.tick(0.016);

        assert_eq!(frame.rejected.len(), 1);
        let settings = sim.terrain().settings();
        assert_eq!(settings.height_scale, 3.0);
        assert_eq!(settings.mode, HeightMode::Octaves);
        assert_eq!(settings.octave_count, TerrainSettings::default().octave_count);
    }

    #[test]
    fn test_apply_synchronously() {
        let mut sim = simulation();
        sim.apply(ControlUpdate::AtmosphereIntensity(1.8)).unwrap();
        assert_eq!(sim.atmosphere().intensity(), 1.8);

        sim.apply(ControlUpdate::NormalMode(NormalMode::Flat)).unwrap();
        assert_eq!(sim.terrain().settings().normal_mode, NormalMode::Flat);

        let before = sim.terrain().grid().clone();
        assert!(sim.apply(ControlUpdate::WorldSize(0.0)).is_err());
        assert_eq!(*sim.terrain().grid(), before);
    }

    #[test]
    fn test_day_night_toggle_holds_light() {
        let mut sim = simulation();
        let lit = sim.tick(4.0).light_intensity;

        sim.apply(ControlUpdate::DayNightEnabled(false)).unwrap();
        assert_eq!(sim.clock().state(), ClockState::Paused);
        let frame = sim.tick(20.0);
        assert_eq!(frame.light_intensity, lit);
        assert_eq!(frame.elapsed_s, 24.0);
    }

    #[test]
    fn test_auto_rotate_toggle() {
        let mut sim = simulation();
        let eye = sim.tick(0.0).camera_eye;
        assert!((sim.tick(1.0).camera_eye - eye).length() > 0.0);

        sim.apply(ControlUpdate::AutoRotateEnabled(false)).unwrap();
        // Let the damped remainder settle before comparing
        for _ in 0..600 {
            sim.tick(0.016);
        }
        let settled = sim.tick(0.016).camera_eye;
        assert!((sim.tick(0.016).camera_eye - settled).length() < 1e-4);
    }

    #[test]
    fn test_control_handle_from_another_thread() {
        let mut sim = simulation();
        let handle = sim.control_handle();

        thread::spawn(move || {
            handle.send(ControlUpdate::Resolution(48));
            handle.send(ControlUpdate::AtmosphereIntensity(0.25));
        })
        .join()
        .unwrap();

        sim.tick(0.016);
        assert_eq!(sim.terrain().settings().resolution, 48);
        assert_eq!(sim.atmosphere().intensity(), 0.25);
    }

    #[test]
    fn test_rejected_edits_carry_their_errors() {
        let mut sim = simulation();
        let handle = sim.control_handle();
        handle.send(ControlUpdate::Resolution(u32::MAX));
        handle.send(ControlUpdate::AtmosphereIntensity(-1.0));

        let frame = sim.tick(0.016);
        let messages: Vec<String> = frame.rejected.iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("at most"), "got: {}", messages[0]);
        assert!(matches!(
            frame.rejected[0],
            ConfigError::ResolutionTooLarge { .. }
        ));
        assert_eq!(sim.terrain().settings().resolution, 16);
    }

    #[test]
    fn test_weather_absent_until_enabled() {
        let mut sim = simulation();
        assert!((0..120).all(|_| sim.tick(1.0).weather.is_none()));
    }

    #[test]
    fn test_weather_broadcast_rate() {
        let params = WeatherParams {
            broadcast_interval_s: 1.0,
            ..WeatherParams::default()
        };
        let mut sim = simulation().with_weather(WeatherSampler::seeded(params, 9));

        let samples = (0..300)
            .filter_map(|_| sim.tick(1.0 / 60.0).weather)
            .count();
        assert!((4..=5).contains(&samples), "got {samples} samples in 5 s");
    }
}
