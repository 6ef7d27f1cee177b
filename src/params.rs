use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::math::lerp;

/// Largest grid side whose vertex indices still fit in a `u32`
pub const MAX_RESOLUTION: usize = 1 << 16;

/// Parameters controlling terrain generation
///
/// Loaded from RON with every field optional; anything missing falls back to
/// [`TerrainParameters::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    /// World-space side length of the square terrain
    pub size: f32,
    /// Samples per side of the grid (at least 2)
    pub resolution: usize,
    /// Multiplier applied to grid indices before the noise lookup
    pub noise_frequency: f32,
    /// Multiplier applied to the [-1, 1] noise value
    pub noise_amplitude: f32,
    /// Elevation reached where the slope blend is fully on
    pub min_height: f32,
    /// Elevation at the reference point, where the slope blend is off
    pub max_height: f32,
    /// Normalized radial distance where the slope blend starts
    pub slope_start: f32,
    /// Normalized radial distance where the slope blend ends
    pub slope_end: f32,
    /// Seed for the noise generator
    pub seed: u32,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        TerrainParameters {
            size: 100.0,
            resolution: 64,
            noise_frequency: 0.1,
            noise_amplitude: 2.0,
            min_height: 0.0,
            max_height: 20.0,
            slope_start: 0.2,
            slope_end: 0.8,
            seed: 0,
        }
    }
}

impl TerrainParameters {
    /// Reject parameters that would produce corrupted geometry
    ///
    /// Values are never clamped into range; the caller gets an error instead.
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("size", self.size),
            ("noise_frequency", self.noise_frequency),
            ("noise_amplitude", self.noise_amplitude),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
            ("slope_start", self.slope_start),
            ("slope_end", self.slope_end),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(TerrainError::ArithmeticDegeneracy { name });
            }
        }

        if self.resolution < 2 {
            return Err(TerrainError::invalid(
                "resolution",
                format!("must be at least 2, got {}", self.resolution),
            ));
        }
        if self.size <= 0.0 {
            return Err(TerrainError::invalid(
                "size",
                format!("must be positive, got {}", self.size),
            ));
        }
        if self.slope_start == self.slope_end {
            return Err(TerrainError::invalid(
                "slope_end",
                format!("must differ from slope_start ({})", self.slope_start),
            ));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(TerrainError::invalid(
                "resolution",
                format!(
                    "must be at most {} so vertex indices fit in u32, got {}",
                    MAX_RESOLUTION, self.resolution
                ),
            ));
        }

        // Finite inputs can still overflow in derived quantities
        if !(self.max_height - self.min_height).is_finite() {
            return Err(TerrainError::ArithmeticDegeneracy { name: "max_height" });
        }
        let height_extent =
            self.noise_amplitude.abs() + self.min_height.abs().max(self.max_height.abs());
        if !height_extent.is_finite() || !(height_extent * 2.0).is_finite() {
            return Err(TerrainError::ArithmeticDegeneracy {
                name: "noise_amplitude",
            });
        }
        if !((self.resolution - 1) as f32 * self.noise_frequency).is_finite() {
            return Err(TerrainError::ArithmeticDegeneracy {
                name: "noise_frequency",
            });
        }
        // Normal components are differences of size × height and size × size products
        let normal_bound = (4.0 * self.size * height_extent).max(2.0 * self.size * self.size);
        if !normal_bound.is_finite() {
            return Err(TerrainError::ArithmeticDegeneracy { name: "size" });
        }
        Ok(())
    }

    /// World-space rectangle covered by the grid, derived from `size`
    pub fn bounds(&self) -> WorldBounds {
        let half = self.size * 0.5;
        WorldBounds {
            min_x: -half,
            min_y: -half,
            max_x: half,
            max_y: half,
        }
    }

    /// Number of vertices in the generated grid
    pub fn vertex_count(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Number of triangle indices in the generated grid
    pub fn index_count(&self) -> usize {
        let cells = self.resolution.saturating_sub(1);
        cells * cells * 6
    }

    /// Where a host should place the rendered object's origin
    pub fn placement_offset(&self) -> Vec3 {
        Vec3::Z * self.size * 0.5
    }

    /// Load parameters from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        ron::from_str(&data).map_err(|e| TerrainError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save parameters to a RON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(
            |e| TerrainError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        )?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Axis-aligned world rectangle on the XZ plane
///
/// `min_y`/`max_y` span the world Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl WorldBounds {
    /// World (x, z) for a normalized grid position
    pub fn world_position(&self, x01: f32, y01: f32) -> (f32, f32) {
        (
            lerp(self.min_x, self.max_x, x01),
            lerp(self.min_y, self.max_y, y01),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(params: &TerrainParameters, expected: &str) {
        match params.validate() {
            Err(TerrainError::InvalidParameter { name, .. }) => {
                assert_eq!(name, expected, "wrong parameter rejected")
            }
            other => panic!("expected InvalidParameter for {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(TerrainParameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_small_resolution() {
        for resolution in [0, 1] {
            let params = TerrainParameters {
                resolution,
                ..Default::default()
            };
            assert_invalid(&params, "resolution");
        }
    }

    #[test]
    fn test_rejects_non_positive_size() {
        for size in [0.0, -10.0] {
            let params = TerrainParameters {
                size,
                ..Default::default()
            };
            assert_invalid(&params, "size");
        }
    }

    #[test]
    fn test_rejects_degenerate_slope_band() {
        let params = TerrainParameters {
            slope_start: 0.5,
            slope_end: 0.5,
            ..Default::default()
        };
        assert_invalid(&params, "slope_end");
    }

    #[test]
    fn test_accepts_inverted_ranges() {
        let params = TerrainParameters {
            min_height: 30.0,
            max_height: -5.0,
            slope_start: 0.9,
            slope_end: 0.1,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let params = TerrainParameters {
            noise_amplitude: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TerrainError::ArithmeticDegeneracy {
                name: "noise_amplitude"
            })
        ));

        let params = TerrainParameters {
            size: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(TerrainError::ArithmeticDegeneracy { name: "size" })
        ));
    }

    #[test]
    fn test_rejects_overflowing_finite_values() {
        let cases = [
            (
                TerrainParameters {
                    min_height: -3.0e38,
                    max_height: 3.0e38,
                    resolution: 3,
                    ..Default::default()
                },
                "max_height",
            ),
            (
                TerrainParameters {
                    noise_amplitude: 3.0e38,
                    max_height: 3.0e38,
                    min_height: 3.0e38,
                    ..Default::default()
                },
                "noise_amplitude",
            ),
            (
                TerrainParameters {
                    noise_frequency: 1.0e37,
                    resolution: 100,
                    ..Default::default()
                },
                "noise_frequency",
            ),
            (
                TerrainParameters {
                    size: 1.0e20,
                    ..Default::default()
                },
                "size",
            ),
            (
                TerrainParameters {
                    size: 1.0e10,
                    max_height: 1.0e30,
                    ..Default::default()
                },
                "size",
            ),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(TerrainError::ArithmeticDegeneracy { name }) => {
                    assert_eq!(name, expected, "wrong parameter rejected")
                }
                other => panic!("expected ArithmeticDegeneracy for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_large_but_safe_values_give_finite_mesh() {
        let params = TerrainParameters {
            size: 1.0e9,
            resolution: 5,
            noise_frequency: 0.37,
            noise_amplitude: 1.0e17,
            min_height: -1.0e18,
            max_height: 1.0e18,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        let mesh = crate::pipeline::regenerate(&params).unwrap();
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
        assert!(mesh.normals.iter().all(|n| n.is_finite()));
    }

    #[test]
    fn test_resolution_limited_to_u32_indices() {
        let params = TerrainParameters {
            resolution: MAX_RESOLUTION,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!((params.vertex_count() - 1) as u64, u32::MAX as u64);

        let params = TerrainParameters {
            resolution: MAX_RESOLUTION + 1,
            ..Default::default()
        };
        assert_invalid(&params, "resolution");
    }

    #[test]
    fn test_bounds_follow_size() {
        let params = TerrainParameters {
            size: 10.0,
            ..Default::default()
        };
        let bounds = params.bounds();
        assert_eq!(bounds.min_x, -5.0);
        assert_eq!(bounds.max_y, 5.0);
        assert_eq!(bounds.world_position(0.0, 0.0), (-5.0, -5.0));
        assert_eq!(bounds.world_position(1.0, 1.0), (5.0, 5.0));
        assert_eq!(bounds.world_position(0.5, 1.0), (0.0, 5.0));
    }

    #[test]
    fn test_counts_and_placement() {
        let params = TerrainParameters {
            size: 40.0,
            resolution: 5,
            ..Default::default()
        };
        assert_eq!(params.vertex_count(), 25);
        assert_eq!(params.index_count(), 96);
        assert_eq!(params.placement_offset(), Vec3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_ron_round_trip_and_partial_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("terrain_params_{}.ron", std::process::id()));

        let params = TerrainParameters {
            size: 250.0,
            resolution: 17,
            seed: 7,
            ..Default::default()
        };
        params.save(&path).unwrap();
        let loaded = TerrainParameters::load(&path).unwrap();
        assert_eq!(loaded, params);

        // Missing fields fall back to defaults
        std::fs::write(&path, "(resolution: 9)").unwrap();
        let partial = TerrainParameters::load(&path).unwrap();
        assert_eq!(partial.resolution, 9);
        assert_eq!(partial.size, TerrainParameters::default().size);

        std::fs::write(&path, "(resolution: \"many\")").unwrap();
        assert!(matches!(
            TerrainParameters::load(&path),
            Err(TerrainError::Config { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }
}
