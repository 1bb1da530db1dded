//! Planetscape - headless driver
//!
//! Runs the simulation loop for a fixed number of frames, logging the
//! day–night light and terrain stats, and optionally exports the height field
//! as a PNG or prints a weather sample as JSON.

use std::path::Path;
use std::time::Instant;

use clap::Parser;
use image::{GrayImage, Luma};

use planetscape::cli::Args;
use planetscape::params::{PlanetConfig, TerrainSettings};
use planetscape::simulation::SimulationLoop;
use planetscape::terrain::HeightFieldSynthesizer;
use planetscape::weather::{PlanetStatistics, WeatherSampler};

/// Side length of the exported heightmap (pixels)
const HEIGHTMAP_SIZE: usize = 256;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.planet_config()?;

    println!("Planetscape");
    println!("  Seed: {}", config.seed);
    println!(
        "  Terrain: {0}x{0} cells, {1:?}, height scale {2}",
        config.terrain.resolution, config.terrain.mode, config.terrain.height_scale
    );

    if let Some(path) = &args.heightmap {
        export_heightmap(&config, path)?;
    }

    if args.weather {
        let mut sampler = WeatherSampler::from_entropy(config.weather);
        println!("{}", serde_json::to_string_pretty(&sampler.sample())?);
        println!("{}", serde_json::to_string_pretty(&PlanetStatistics::mars())?);
    }

    run_frames(&config, args.frames, args.dt)?;
    Ok(())
}

/// Tick the simulation headlessly, reporting roughly once per simulated second
fn run_frames(
    config: &PlanetConfig,
    frames: u32,
    dt: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = SimulationLoop::new(config)?;
    let report_every = ((1.0 / dt.max(f32::EPSILON)).round() as u32).max(1);

    let (lo, hi) = sim.terrain().height_range();
    log::info!(
        "terrain: {} vertices, {} triangles, heights {lo:.2}..{hi:.2}",
        sim.terrain().positions().len(),
        sim.terrain().indices().len() / 3
    );

    let start = Instant::now();
    for frame in 0..frames {
        let state = sim.tick(dt);
        if frame % report_every == 0 {
            log::info!(
                "t={:.1}s light={:.3} eye=({:.1}, {:.1}, {:.1})",
                state.elapsed_s,
                state.light_intensity,
                state.camera_eye.x,
                state.camera_eye.y,
                state.camera_eye.z
            );
        }
    }

    let elapsed = start.elapsed();
    println!("  Frames: {frames} ({:.1}s simulated)", sim.clock().elapsed_s());
    println!("  Final light: {:.3}", sim.clock().light_intensity());
    println!("  Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    Ok(())
}

/// Sample the height field and write it as a normalized grayscale PNG
fn export_heightmap(config: &PlanetConfig, path: &Path) -> Result<(), image::ImageError> {
    let synthesizer = HeightFieldSynthesizer::with_seed(config.seed);
    let heights = synthesizer.sample_grid(&config.terrain, HEIGHTMAP_SIZE);
    let img = heights_to_image(&heights, HEIGHTMAP_SIZE, &config.terrain);

    img.save(path)?;
    println!("  Heightmap: {}", path.display());
    Ok(())
}

/// Map min..max heights onto 0..255
fn heights_to_image(heights: &[f32], size: usize, settings: &TerrainSettings) -> GrayImage {
    let (lo, hi) = heights
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        });
    let span = hi - lo;
    log::debug!(
        "heightmap {size}x{size} over {} world units, heights {lo:.2}..{hi:.2}",
        settings.world_size
    );

    let mut img = GrayImage::new(size as u32, size as u32);
    for (i, &h) in heights.iter().enumerate() {
        let gray = if span > 0.0 {
            ((h - lo) / span * 255.0).round().clamp(0.0, 255.0) as u8
        } else {
            0
        };
        img.put_pixel((i % size) as u32, (i / size) as u32, Luma([gray]));
    }
    img
}
