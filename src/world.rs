//! World facade
//!
//! Ties the coordinate space, the chunk generator and the chunk store
//! together and answers queries in world pixel coordinates. Queries never
//! generate: a chunk must be made resident with `ensure_chunks_in_window`
//! before it can be read.

use tracing::info;

use crate::biomes::TerrainType;
use crate::chunk::Chunk;
use crate::chunk_store::ChunkStore;
use crate::config::WorldConfig;
use crate::coords::{ChunkCoord, ChunkWindow, CoordSpace, LocalCoord, WorldPos};
use crate::error::{Result, WorldError};
use crate::generator::ChunkGenerator;
use crate::objects::PlacedObject;

/// An infinite chunked world built from one seed
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    space: CoordSpace,
    generator: ChunkGenerator,
    store: ChunkStore,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let config = config.sanitized();
        let space = CoordSpace::new(config.cell_size, config.chunk_size);
        let generator = ChunkGenerator::new(&config);
        info!("world created with seed {}", config.seed);

        Self {
            config,
            space,
            generator,
            store: ChunkStore::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(WorldConfig::with_seed(seed))
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn space(&self) -> &CoordSpace {
        &self.space
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Make every chunk within `radius` of `center` resident and evict the
    /// rest. Returns the number of chunks generated.
    pub fn ensure_chunks_in_window(&mut self, center: ChunkCoord, radius: u32) -> usize {
        let window = ChunkWindow::new(center, radius);
        let generated = self.store.ensure_window(&self.generator, &window);
        self.store.evict_outside(&window);
        generated
    }

    /// `ensure_chunks_in_window` around the chunk holding a world position,
    /// using the configured retention radius.
    pub fn ensure_around(&mut self, pos: WorldPos) -> usize {
        let center = self.space.chunk_of(pos);
        self.ensure_chunks_in_window(center, self.config.retention_radius)
    }

    pub fn chunk_of(&self, x: i64, y: i64) -> ChunkCoord {
        self.space.chunk_of(WorldPos::new(x, y))
    }

    pub fn tile_at(&self, x: i64, y: i64) -> Result<TerrainType> {
        let (chunk, local) = self.resolve(x, y)?;
        Ok(chunk.terrain_at(local))
    }

    /// Objects on the cell in insertion order.
    pub fn objects_at(&self, x: i64, y: i64) -> Result<&[PlacedObject]> {
        let (chunk, local) = self.resolve(x, y)?;
        Ok(chunk.objects_at(local))
    }

    pub fn passable(&self, x: i64, y: i64) -> Result<bool> {
        let (chunk, local) = self.resolve(x, y)?;
        Ok(chunk.is_passable(local))
    }

    /// A resident chunk.
    pub fn chunk(&self, coord: ChunkCoord) -> Result<&Chunk> {
        self.store
            .get(coord)
            .ok_or(WorldError::ChunkNotResident { chunk: coord })
    }

    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.store.has_chunk(coord)
    }

    /// Resident chunk coordinates in row order.
    pub fn resident_chunks(&self) -> Vec<ChunkCoord> {
        self.store.coords()
    }

    pub fn persistence(&self) -> f64 {
        self.config.generator.persistence
    }

    pub fn octave(&self) -> u32 {
        self.config.generator.octave
    }

    /// Change the noise persistence (negative values clamp to 0). Drops every
    /// resident chunk.
    pub fn set_persistence(&mut self, persistence: f64) {
        self.config.generator.persistence = persistence;
        self.rebuild();
    }

    /// Change the noise octave count (clamped to at least 1). Drops every
    /// resident chunk.
    pub fn set_octave(&mut self, octave: u32) {
        self.config.generator.octave = octave;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.config.generator = self.config.generator.clone().sanitized();
        self.generator = ChunkGenerator::new(&self.config);
        let dropped = self.store.len();
        self.store.clear();
        info!(
            "generator changed (persistence {}, octave {}), dropped {} chunks",
            self.config.generator.persistence, self.config.generator.octave, dropped
        );
    }

    fn resolve(&self, x: i64, y: i64) -> Result<(&Chunk, LocalCoord)> {
        let (coord, local) = self.space.split(WorldPos::new(x, y));
        Ok((self.chunk(coord)?, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorParams;

    fn small_world() -> World {
        World::new(WorldConfig {
            chunk_size: 16,
            cell_size: 8,
            ..WorldConfig::with_seed(11)
        })
    }

    #[test]
    fn test_queries_require_resident_chunk() {
        let world = small_world();
        assert!(matches!(
            world.tile_at(0, 0),
            Err(WorldError::ChunkNotResident { chunk }) if chunk == ChunkCoord::new(0, 0)
        ));
        assert!(world.objects_at(-5, 3).is_err());
        assert!(world.passable(1000, 1000).is_err());
    }

    #[test]
    fn test_queries_map_pixels_to_cells() {
        let mut world = small_world();
        assert_eq!(world.ensure_chunks_in_window(ChunkCoord::new(0, 0), 1), 9);

        // Cell (3, 2) of chunk (-1, 0) spans pixels [-104, -97] x [16, 23]
        let chunk = world.chunk(ChunkCoord::new(-1, 0)).unwrap();
        let expected = chunk.terrain_at(LocalCoord::new(3, 2));
        assert_eq!(world.tile_at(-104, 16).unwrap(), expected);
        assert_eq!(world.tile_at(-97, 23).unwrap(), expected);
        assert_eq!(world.chunk_of(-1, 0), ChunkCoord::new(-1, 0));
    }

    #[test]
    fn test_moving_window_evicts() {
        let mut world = small_world();
        world.ensure_chunks_in_window(ChunkCoord::new(0, 0), 1);
        world.ensure_chunks_in_window(ChunkCoord::new(5, 5), 0);
        assert_eq!(world.resident_chunks(), vec![ChunkCoord::new(5, 5)]);
        assert!(world.tile_at(0, 0).is_err());
    }

    #[test]
    fn test_parameter_change_drops_chunks() {
        let mut world = small_world();
        world.ensure_chunks_in_window(ChunkCoord::new(0, 0), 1);
        world.set_persistence(0.5);
        assert!(world.resident_chunks().is_empty());
        assert_eq!(world.persistence(), 0.5);

        world.set_octave(0);
        assert_eq!(world.octave(), 1);
        assert_eq!(world.generator().params().octave, 1);
    }

    #[test]
    fn test_negative_persistence_clamps_to_zero() {
        let mut world = small_world();
        world.set_persistence(-0.16);
        assert_eq!(world.persistence(), 0.0);

        world.set_persistence(f64::NAN);
        assert_eq!(world.persistence(), GeneratorParams::default().persistence);
    }
}
