//! Infinite chunked world generation
//!
//! Deterministic terrain from layered noise, walled towns and road networks,
//! generated chunk by chunk around a moving camera.

pub mod ascii;
pub mod biomes;
pub mod chunk;
pub mod chunk_store;
pub mod config;
pub mod coords;
pub mod error;
pub mod generator;
pub mod naming;
pub mod noise_field;
pub mod objects;
pub mod seeds;
pub mod structures;
pub mod tilemap;
pub mod world;

pub use biomes::{classify, TerrainType};
pub use chunk::Chunk;
pub use config::{GeneratorParams, TownParams, WorldConfig};
pub use coords::{ChunkCoord, ChunkWindow, CoordSpace, LocalCoord, WorldPos};
pub use error::{Result, WorldError};
pub use objects::PlacedObject;
pub use world::World;
