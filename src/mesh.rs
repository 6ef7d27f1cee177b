use glam::{Vec2, Vec3};

use crate::error::{Result, TerrainError};
use crate::heightfield::HeightField;
use crate::math::normalized_index;
use crate::params::TerrainParameters;

/// Renderable grid mesh: parallel per-vertex arrays plus a triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Per-vertex normals, not unit length
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Normals scaled to unit length; zero-length normals become `+Y`
    pub fn normalized_normals(&self) -> Vec<Vec3> {
        self.normals
            .iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect()
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions.as_slice())
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.uvs.as_slice())
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.normals.as_slice())
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices.as_slice())
    }
}

/// Build the grid mesh for a synthesized height field
pub fn build(height_field: &HeightField, params: &TerrainParameters) -> Result<MeshBuffers> {
    params.validate()?;
    let resolution = params.resolution;
    if height_field.resolution() != resolution {
        return Err(TerrainError::ResolutionMismatch {
            expected: resolution,
            actual: height_field.resolution(),
        });
    }

    let vertex_count = resolution * resolution;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let heights = height_field.as_slice();
    let bounds = params.bounds();

    for y in 0..resolution {
        let y01 = normalized_index(y, resolution);
        for x in 0..resolution {
            let x01 = normalized_index(x, resolution);
            let (world_x, world_z) = bounds.world_position(x01, y01);
            positions.push(Vec3::new(world_x, heights[y * resolution + x], world_z));
            uvs.push(Vec2::new(x01, y01));
        }
    }

    let normals = calculate_normals(&positions, resolution);
    let indices = triangulate(resolution);

    Ok(MeshBuffers {
        positions,
        uvs,
        normals,
        indices,
    })
}

/// Per-vertex normals from neighbouring positions
///
/// Edge vertices stand in for their missing neighbour, giving a one-sided
/// difference. The result is `bottom_top × left_right`, which points up for
/// a flat grid and agrees with the front face of [`triangulate`]'s winding.
/// The operand order is deliberately reversed from `left_right × bottom_top`,
/// which would give every normal the opposite sign and point a flat grid down.
fn calculate_normals(positions: &[Vec3], resolution: usize) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(positions.len());

    for y in 0..resolution {
        for x in 0..resolution {
            let i = y * resolution + x;
            let left = if x == 0 { positions[i] } else { positions[i - 1] };
            let right = if x == resolution - 1 { positions[i] } else { positions[i + 1] };
            let bottom = if y == 0 { positions[i] } else { positions[i - resolution] };
            let top = if y == resolution - 1 {
                positions[i]
            } else {
                positions[i + resolution]
            };

            let left_right = right - left;
            let bottom_top = top - bottom;
            normals.push(bottom_top.cross(left_right));
        }
    }

    normals
}

/// Two triangles per grid cell
///
/// Validation caps `resolution` at `MAX_RESOLUTION`, so every index fits in a `u32`.
fn triangulate(resolution: usize) -> Vec<u32> {
    let cells = resolution - 1;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    let width = resolution as u32;

    for y in 0..cells {
        for x in 0..cells {
            let i = (y * resolution + x) as u32;

            indices.extend([i, i + width, i + 1]);
            indices.extend([i + 1 + width, i + 1, i + width]);
        }
    }

    indices
}
