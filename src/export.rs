use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use mesh_tools::GltfBuilder;
use mesh_tools::Triangle;

use crate::heightfield::HeightField;
use crate::mesh::MeshBuffers;
use crate::params::TerrainParameters;
use crate::pipeline::TerrainHost;

/// Exports a terrain mesh in GLB format
///
/// The node is translated by the parameters' placement offset. Normals are
/// written unit length, as glTF requires.
///
/// # Arguments
/// * `mesh` - Generated terrain buffers
/// * `params` - Parameters the mesh was generated from
/// * `output_path` - Path where the GLB file will be saved
pub fn export_mesh_to_glb(
    mesh: &MeshBuffers,
    params: &TerrainParameters,
    output_path: &Path,
) -> Result<()> {
    let mut builder = GltfBuilder::new();

    let positions: Vec<_> = mesh
        .positions
        .iter()
        .map(|p| mesh_tools::compat::point3::new(p.x, p.y, p.z))
        .collect();
    let normals: Vec<_> = mesh
        .normalized_normals()
        .iter()
        .map(|n| mesh_tools::compat::vector3::new(n.x, n.y, n.z))
        .collect();
    let texcoords: Vec<_> = mesh
        .uvs
        .iter()
        .map(|uv| mesh_tools::compat::vector2::new(uv.x, uv.y))
        .collect();
    let triangles: Vec<_> = mesh
        .triangles()
        .map(|[a, b, c]| Triangle::new(a, b, c))
        .collect();

    let mesh_index = builder.create_simple_mesh(
        Some("TerrainMesh".to_string()),
        &positions,
        &triangles,
        Some(normals),
        Some(texcoords),
        None,
    );

    let offset = params.placement_offset();
    let node = builder.add_node(
        Some("Terrain".to_string()),
        Some(mesh_index),
        Some([offset.x, offset.y, offset.z]),
        None,
        None,
    );

    builder.add_scene(Some("Main Scene".to_string()), Some(vec![node]));

    builder
        .export_glb(&*output_path.to_string_lossy())
        .with_context(|| format!("failed to write GLB to {}", output_path.display()))?;

    Ok(())
}

/// Export a height field as a CSV grid, one row per line
pub fn export_heightfield_csv(field: &HeightField, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "# Grid dimensions: {} x {}",
        field.resolution(),
        field.resolution()
    )?;

    for y in 0..field.resolution() {
        let mut line = String::new();
        for x in 0..field.resolution() {
            if x > 0 {
                line.push(',');
            }
            match field.get(x, y) {
                Some(value) => line.push_str(&format!("{:.3}", value)),
                None => line.push('0'),
            }
        }
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Host that writes every regenerated mesh to a GLB file
pub struct GlbHost {
    path: PathBuf,
    exports: usize,
}

impl GlbHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GlbHost {
            path: path.into(),
            exports: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of meshes written so far
    pub fn exports(&self) -> usize {
        self.exports
    }

    fn write(&mut self, mesh: &MeshBuffers, params: &TerrainParameters) -> Result<()> {
        export_mesh_to_glb(mesh, params, &self.path)?;
        self.exports += 1;
        info!(
            "Wrote {} vertices, {} triangles to {}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            self.path.display()
        );
        Ok(())
    }
}

impl TerrainHost for GlbHost {
    fn attach(&mut self, mesh: MeshBuffers, params: &TerrainParameters) -> Result<()> {
        self.write(&mesh, params)
    }

    fn update(&mut self, mesh: MeshBuffers, params: &TerrainParameters) -> Result<()> {
        self.write(&mesh, params)
    }
}
