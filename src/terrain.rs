//! Procedural terrain: height-field synthesis and the grid mesh built on it.

mod height;
mod mesh;

// Re-export public types
pub use height::{ClosedFormHeight, HeightField, HeightFieldSynthesizer, OctaveNoiseHeight};
pub use mesh::{TerrainMesh, Vertex, VertexGrid};
