use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use terrain_maker::export::{GlbHost, export_heightfield_csv};
use terrain_maker::{NoiseSampler, Terrain, TerrainParameters, synthesize};

/// Generate a heightmap terrain mesh and export it as GLB
#[derive(Parser, Debug)]
#[command(name = "terrain-maker", version, about)]
struct Args {
    /// RON file with terrain parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World-space side length
    #[arg(long)]
    size: Option<f32>,

    /// Samples per side
    #[arg(short, long)]
    resolution: Option<usize>,

    #[arg(long)]
    noise_frequency: Option<f32>,

    #[arg(long)]
    noise_amplitude: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    min_height: Option<f32>,

    #[arg(long, allow_hyphen_values = true)]
    max_height: Option<f32>,

    #[arg(long)]
    slope_start: Option<f32>,

    #[arg(long)]
    slope_end: Option<f32>,

    /// Noise seed
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<u32>,

    /// Pick a random noise seed
    #[arg(long)]
    random_seed: bool,

    /// Output GLB path
    #[arg(short, long, default_value = "terrain_mesh.glb")]
    output: PathBuf,

    /// Also dump the height field as CSV
    #[arg(long)]
    heightmap_csv: Option<PathBuf>,

    /// Write the final parameters to a RON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Args {
    fn parameters(&self) -> Result<TerrainParameters> {
        let mut params = match &self.config {
            Some(path) => TerrainParameters::load(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => TerrainParameters::default(),
        };

        if let Some(v) = self.size {
            params.size = v;
        }
        if let Some(v) = self.resolution {
            params.resolution = v;
        }
        if let Some(v) = self.noise_frequency {
            params.noise_frequency = v;
        }
        if let Some(v) = self.noise_amplitude {
            params.noise_amplitude = v;
        }
        if let Some(v) = self.min_height {
            params.min_height = v;
        }
        if let Some(v) = self.max_height {
            params.max_height = v;
        }
        if let Some(v) = self.slope_start {
            params.slope_start = v;
        }
        if let Some(v) = self.slope_end {
            params.slope_end = v;
        }
        if let Some(v) = self.seed {
            params.seed = v;
        }
        if self.random_seed {
            params.seed = rand::random();
        }
        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.parameters()?;

    println!("Terrain Maker - heightmap terrain generation");
    println!(
        "Generating {}x{} grid over {} units (seed {})...",
        params.resolution, params.resolution, params.size, params.seed
    );

    let terrain = Terrain::new(params, GlbHost::new(&args.output))
        .context("terrain generation failed")?;
    let params = terrain.params();
    info!("Placement offset: {}", params.placement_offset());

    if let Some(path) = &args.heightmap_csv {
        let field = synthesize(params, &NoiseSampler::new(params.seed))?;
        let (lo, hi) = field.min_max();
        export_heightfield_csv(&field, path)?;
        println!(
            "Exported height field ({:.3}..{:.3}) to {}",
            lo,
            hi,
            path.display()
        );
    }

    if let Some(path) = &args.save_config {
        params
            .save(path)
            .with_context(|| format!("saving parameters to {}", path.display()))?;
        println!("Saved parameters to {}", path.display());
    }

    println!("Successfully exported 3D mesh to: {}", args.output.display());

    Ok(())
}
