//! Planetscape - procedural planet terrain with a living environment
//!
//! Simplex-noise height fields meshed into a terrain grid, a rim-lit
//! atmosphere shell, a day–night light cycle, an orbit camera and a
//! stochastic weather feed, all driven by a host-ticked simulation loop.

pub mod atmosphere;
pub mod camera;
pub mod cli;
pub mod environment;
pub mod error;
pub mod params;
pub mod simplex;
pub mod simulation;
pub mod terrain;
pub mod weather;
