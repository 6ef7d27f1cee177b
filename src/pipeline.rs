use log::{debug, info, warn};

use crate::error::Result;
use crate::heightfield::synthesize;
use crate::mesh::{MeshBuffers, build};
use crate::noise_field::NoiseSampler;
use crate::params::TerrainParameters;

/// Generate a complete terrain mesh from parameters
///
/// Validation runs before any buffer is allocated. On error nothing is produced.
pub fn regenerate(params: &TerrainParameters) -> Result<MeshBuffers> {
    params.validate()?;
    let sampler = NoiseSampler::new(params.seed);
    let height_field = synthesize(params, &sampler)?;
    build(&height_field, params)
}

/// Receives generated meshes and turns them into something renderable
pub trait TerrainHost {
    /// Called once, after the first successful regeneration
    fn attach(&mut self, mesh: MeshBuffers, params: &TerrainParameters) -> anyhow::Result<()>;

    /// Called after every later successful regeneration
    fn update(&mut self, mesh: MeshBuffers, params: &TerrainParameters) -> anyhow::Result<()>;
}

/// A single change to one terrain parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterEdit {
    Size(f32),
    Resolution(usize),
    NoiseFrequency(f32),
    NoiseAmplitude(f32),
    MinHeight(f32),
    MaxHeight(f32),
    SlopeStart(f32),
    SlopeEnd(f32),
    Seed(u32),
}

impl ParameterEdit {
    pub fn apply(self, params: &mut TerrainParameters) {
        match self {
            ParameterEdit::Size(v) => params.size = v,
            ParameterEdit::Resolution(v) => params.resolution = v,
            ParameterEdit::NoiseFrequency(v) => params.noise_frequency = v,
            ParameterEdit::NoiseAmplitude(v) => params.noise_amplitude = v,
            ParameterEdit::MinHeight(v) => params.min_height = v,
            ParameterEdit::MaxHeight(v) => params.max_height = v,
            ParameterEdit::SlopeStart(v) => params.slope_start = v,
            ParameterEdit::SlopeEnd(v) => params.slope_end = v,
            ParameterEdit::Seed(v) => params.seed = v,
        }
    }
}

/// Drives regeneration for one terrain instance
///
/// Holds the last parameters that produced a mesh. Regeneration takes
/// `&mut self`, so two runs on the same instance never overlap.
pub struct Terrain<H: TerrainHost> {
    params: TerrainParameters,
    host: H,
    attached: bool,
    generations: u64,
}

impl<H: TerrainHost> Terrain<H> {
    /// Create the terrain and run the initial generation
    pub fn new(params: TerrainParameters, host: H) -> anyhow::Result<Self> {
        let mut terrain = Terrain {
            params: params.clone(),
            host,
            attached: false,
            generations: 0,
        };
        terrain.regenerate_with(params)?;
        Ok(terrain)
    }

    /// Parameters of the mesh currently held by the host
    pub fn params(&self) -> &TerrainParameters {
        &self.params
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of successful regenerations so far
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn set_size(&mut self, size: f32) -> anyhow::Result<()> {
        self.apply_edits([ParameterEdit::Size(size)])
    }

    pub fn set_resolution(&mut self, resolution: usize) -> anyhow::Result<()> {
        self.apply_edits([ParameterEdit::Resolution(resolution)])
    }

    pub fn set_noise_frequency(&mut self, frequency: f32) -> anyhow::Result<()> {
        self.apply_edits([ParameterEdit::NoiseFrequency(frequency)])
    }

    /// Apply a batch of edits and regenerate once with the final values
    pub fn apply_edits(&mut self, edits: impl IntoIterator<Item = ParameterEdit>) -> anyhow::Result<()> {
        let mut next = self.params.clone();
        let mut count = 0;
        for edit in edits {
            edit.apply(&mut next);
            count += 1;
        }
        if count == 0 {
            return Ok(());
        }
        debug!("Coalesced {} parameter edit(s)", count);
        self.regenerate_with(next)
    }

    /// Regenerate with a full parameter set
    ///
    /// On failure the previous parameters and the host's mesh stay in place.
    pub fn regenerate_with(&mut self, params: TerrainParameters) -> anyhow::Result<()> {
        let mesh = match regenerate(&params) {
            Ok(mesh) => mesh,
            Err(e) => {
                warn!("Keeping previous terrain: {}", e);
                return Err(e.into());
            }
        };
        info!("v: {}", mesh.vertex_count());

        if self.attached {
            self.host.update(mesh, &params)?;
        } else {
            self.host.attach(mesh, &params)?;
            self.attached = true;
        }
        self.params = params;
        self.generations += 1;
        Ok(())
    }
}
