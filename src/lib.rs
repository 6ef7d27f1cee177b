//! Procedural heightmap terrain.
//!
//! A [`TerrainParameters`] value is turned into a [`HeightField`] by sampling
//! seeded Perlin noise blended over a radial slope, and the height field is
//! turned into [`MeshBuffers`] (positions, UVs, normals, triangle indices).
//! [`regenerate`] runs the whole pipeline; [`Terrain`] keeps the last good
//! parameters and hands each new mesh to a [`TerrainHost`].

pub mod error;
pub mod export;
pub mod heightfield;
pub mod math;
pub mod mesh;
pub mod noise_field;
pub mod params;
pub mod pipeline;

pub use error::TerrainError;
pub use heightfield::{HeightField, synthesize};
pub use mesh::{MeshBuffers, build};
pub use noise_field::NoiseSampler;
pub use params::{TerrainParameters, WorldBounds};
pub use pipeline::{ParameterEdit, Terrain, TerrainHost, regenerate};
