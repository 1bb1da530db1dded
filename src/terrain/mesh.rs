//! Terrain grid mesh: vertex positions, triangle indices and normals.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::height::{HeightField, HeightFieldSynthesizer};
use crate::error::ConfigError;
use crate::params::{NormalMode, TerrainSettings};

/// Interleaved vertex data for GPU upload (position + normal + UV)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Row-major vertex positions with a parallel array of unit normals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexGrid {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

/// Terrain plane of `resolution × resolution` cells, heights along +Z
///
/// Vertex rows run from +y to −y and columns from −x to +x, centred on the
/// origin. Every cell is split into two counter-clockwise triangles whose
/// normals face +Z.
pub struct TerrainMesh {
    grid: VertexGrid,
    indices: Vec<u32>,
    face_normals: Vec<Vec3>,
    settings: TerrainSettings,
    synthesizer: HeightFieldSynthesizer,
    revision: u64,
}

impl TerrainMesh {
    /// Build the initial grid
    pub fn new(
        synthesizer: HeightFieldSynthesizer,
        settings: &TerrainSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut mesh = Self {
            grid: VertexGrid::default(),
            indices: Vec::new(),
            face_normals: Vec::new(),
            settings: *settings,
            synthesizer,
            revision: 0,
        };
        mesh.rebuild(settings);
        Ok(mesh)
    }

    /// Rebuild the whole grid, allocating new buffers
    ///
    /// The new grid is assembled off to the side and swapped in only once
    /// complete; on error the current grid is untouched.
    pub fn regenerate(&mut self, settings: &TerrainSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.rebuild(settings);
        log::debug!(
            "terrain regenerated: resolution {}, {} vertices",
            settings.resolution,
            self.grid.positions.len()
        );
        Ok(())
    }

    /// Recompute heights and normals in place for an unchanged resolution
    ///
    /// World size, height scale, octaves and modes may all change; the vertex
    /// buffers are reused as-is.
    pub fn update_heights(&mut self, settings: &TerrainSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        if settings.resolution != self.settings.resolution {
            return Err(ConfigError::GridMismatch {
                expected: self.settings.resolution as usize,
                found: settings.resolution as usize,
            });
        }

        fill_positions(&self.synthesizer, settings, &mut self.grid.positions);
        compute_normals(
            settings,
            &self.grid.positions,
            &self.indices,
            &mut self.face_normals,
            &mut self.grid.normals,
        );

        self.settings = *settings;
        self.revision += 1;
        log::trace!("terrain heights updated (revision {})", self.revision);
        Ok(())
    }

    fn rebuild(&mut self, settings: &TerrainSettings) {
        let vertex_count = settings.vertex_count();
        let face_count = 2 * (settings.resolution as usize).pow(2);

        let mut positions = vec![Vec3::ZERO; vertex_count];
        let mut normals = vec![Vec3::Z; vertex_count];
        let mut face_normals = vec![Vec3::Z; face_count];
        let indices = generate_indices(settings.resolution);

        fill_positions(&self.synthesizer, settings, &mut positions);
        compute_normals(settings, &positions, &indices, &mut face_normals, &mut normals);

        self.grid = VertexGrid { positions, normals };
        self.indices = indices;
        self.face_normals = face_normals;
        self.settings = *settings;
        self.revision += 1;
    }

    /// Vertex positions and normals
    pub fn grid(&self) -> &VertexGrid {
        &self.grid
    }

    /// Row-major vertex positions, heights along +Z
    pub fn positions(&self) -> &[Vec3] {
        &self.grid.positions
    }

    /// Unit vertex normals, parallel to `positions`
    pub fn normals(&self) -> &[Vec3] {
        &self.grid.normals
    }

    /// Triangle list, three indices per face
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// One unit normal per triangle, in index-buffer order
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Settings the current grid was built from
    pub fn settings(&self) -> &TerrainSettings {
        &self.settings
    }

    /// Height source the grid is sampled from
    pub fn synthesizer(&self) -> &HeightFieldSynthesizer {
        &self.synthesizer
    }

    /// Bumped on every successful regenerate or height update
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Lowest and highest vertex elevation
    pub fn height_range(&self) -> (f32, f32) {
        self.grid
            .positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.z), hi.max(p.z))
            })
    }

    /// Interleaved vertices for upload; pair with `bytemuck::cast_slice`
    pub fn to_vertices(&self) -> Vec<Vertex> {
        let side = self.settings.vertices_per_side();
        let res = self.settings.resolution as f32;

        self.grid
            .positions
            .iter()
            .zip(&self.grid.normals)
            .enumerate()
            .map(|(i, (p, n))| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: [(i % side) as f32 / res, 1.0 - (i / side) as f32 / res],
            })
            .collect()
    }
}

/// Lay out the plane and sample a height for every vertex
fn fill_positions(
    synthesizer: &HeightFieldSynthesizer,
    settings: &TerrainSettings,
    positions: &mut [Vec3],
) {
    let side = settings.vertices_per_side();
    let cell = settings.cell_size();
    let half = settings.world_size / 2.0;

    for (i, p) in positions.iter_mut().enumerate() {
        let x = (i % side) as f32 * cell - half;
        let y = half - (i / side) as f32 * cell;
        *p = Vec3::new(x, y, synthesizer.height(x, y, settings));
    }
}

/// Two counter-clockwise triangles per cell
fn generate_indices(resolution: u32) -> Vec<u32> {
    let side = resolution + 1;
    let mut indices = Vec::with_capacity(resolution as usize * resolution as usize * 6);

    for iy in 0..resolution {
        for ix in 0..resolution {
            let a = iy * side + ix;
            let b = a + side;
            let c = b + 1;
            let d = a + 1;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

/// Unnormalised cross product of a triangle's edges (length = 2 × area)
#[inline]
fn face_cross(positions: &[Vec3], tri: &[u32]) -> Vec3 {
    let a = positions[tri[0] as usize];
    let b = positions[tri[1] as usize];
    let c = positions[tri[2] as usize];
    (b - a).cross(c - a)
}

/// Face normals plus per-vertex normals in one pass over the triangles
///
/// Each face cross is computed once: normalised into `face_normals`, and in
/// smooth mode also summed unnormalised into its vertices (area weighting).
fn compute_normals(
    settings: &TerrainSettings,
    positions: &[Vec3],
    indices: &[u32],
    face_normals: &mut [Vec3],
    normals: &mut [Vec3],
) {
    let smooth = settings.normal_mode == NormalMode::Smooth;
    if smooth {
        normals.fill(Vec3::ZERO);
    }

    for (face, tri) in face_normals.iter_mut().zip(indices.chunks_exact(3)) {
        let cross = face_cross(positions, tri);
        *face = cross.try_normalize().unwrap_or(Vec3::Z);
        if smooth {
            for &v in tri {
                normals[v as usize] += cross;
            }
        }
    }

    match settings.normal_mode {
        NormalMode::Smooth => {
            for n in normals.iter_mut() {
                *n = n.try_normalize().unwrap_or(Vec3::Z);
            }
        }
        NormalMode::Flat => {
            // Each vertex carries the first face of the cell it anchors;
            // the last row and column borrow from the neighbouring cell.
            let res = settings.resolution as usize;
            let side = res + 1;
            for (i, n) in normals.iter_mut().enumerate() {
                let cx = (i % side).min(res - 1);
                let cy = (i / side).min(res - 1);
                *n = face_normals[2 * (cy * res + cx)];
            }
        }
    }
}
