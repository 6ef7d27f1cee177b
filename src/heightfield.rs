use log::debug;

use crate::error::Result;
use crate::math::{lerp, normalized_index, smooth_step};
use crate::noise_field::NoiseSampler;
use crate::params::TerrainParameters;

/// Square grid of elevations stored row-major (`index = y * resolution + x`)
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    resolution: usize,
    heights: Vec<f32>,
}

impl HeightField {
    /// Get the elevation at a grid position, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.resolution && y < self.resolution {
            Some(self.heights[y * self.resolution + x])
        } else {
            None
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Lowest and highest elevation in the field
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// Slope blend factor at a world position
///
/// Radial distance from the south edge midpoint `(0, -size/2)`, normalized by
/// `size/2`, pushed through the `slope_start..slope_end` S-curve. 0 keeps the
/// full `max_height`, 1 reaches `min_height`.
pub fn height01(params: &TerrainParameters, world_x: f32, world_z: f32) -> f32 {
    let half = params.size * 0.5;
    let dx = world_x;
    let dz = world_z + half;
    let dist_norm = (dx * dx + dz * dz).sqrt() / half;
    smooth_step(params.slope_start, params.slope_end, dist_norm)
}

/// Synthesize the elevation grid for a set of parameters
///
/// Parameters are validated before anything is allocated.
pub fn synthesize(params: &TerrainParameters, sampler: &NoiseSampler) -> Result<HeightField> {
    params.validate()?;

    let resolution = params.resolution;
    let bounds = params.bounds();
    let mut heights = Vec::with_capacity(resolution * resolution);

    for y in 0..resolution {
        let y01 = normalized_index(y, resolution);
        for x in 0..resolution {
            let x01 = normalized_index(x, resolution);
            let (world_x, world_z) = bounds.world_position(x01, y01);

            let noise = sampler.sample_signed(
                x as f32 * params.noise_frequency,
                y as f32 * params.noise_frequency,
            ) * params.noise_amplitude;

            let blend = height01(params, world_x, world_z);
            let noise = lerp(0.0, noise, blend);
            // Inverted on purpose: blend 0 sits at max_height
            let base = lerp(params.max_height, params.min_height, blend);

            heights.push(base + noise);
        }
    }

    debug!(
        "Synthesized {}x{} height field (seed {})",
        resolution,
        resolution,
        sampler.seed()
    );

    Ok(HeightField {
        resolution,
        heights,
    })
}
