//! Resident chunk storage
//!
//! Keeps generated chunks keyed by chunk coordinate. Missing chunks in a
//! window are generated in parallel and published in one pass, so a reader
//! never sees a half-built chunk.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::chunk::Chunk;
use crate::coords::{ChunkCoord, ChunkWindow};
use crate::generator::ChunkGenerator;

/// Cache of generated chunks with window-based eviction
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Generate the chunk at `coord` unless it is already resident.
    /// Returns true when a chunk was generated.
    pub fn ensure_chunk(&mut self, generator: &ChunkGenerator, coord: ChunkCoord) -> bool {
        if self.chunks.contains_key(&coord) {
            return false;
        }
        self.chunks.insert(coord, generator.generate(coord));
        true
    }

    /// Make every chunk of `window` resident. Returns how many were generated.
    pub fn ensure_window(&mut self, generator: &ChunkGenerator, window: &ChunkWindow) -> usize {
        let missing: Vec<ChunkCoord> = window.coords().filter(|c| !self.has_chunk(*c)).collect();
        if missing.is_empty() {
            return 0;
        }

        let generated: Vec<Chunk> = missing.par_iter().map(|&coord| generator.generate(coord)).collect();
        let count = generated.len();
        for chunk in generated {
            self.chunks.insert(chunk.coord, chunk);
        }

        debug!("generated {} chunks around {}", count, window.center);
        count
    }

    /// Drop every chunk outside `window`. Returns how many were evicted.
    pub fn evict_outside(&mut self, window: &ChunkWindow) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| window.contains(*coord));
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            debug!("evicted {} chunks outside {}", evicted, window.center);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Resident coordinates in row order (y, then x).
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn small_generator() -> ChunkGenerator {
        let config = WorldConfig {
            chunk_size: 16,
            ..WorldConfig::with_seed(7)
        };
        ChunkGenerator::new(&config)
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let generator = small_generator();
        let mut store = ChunkStore::new();
        let window = ChunkWindow::new(ChunkCoord::new(0, 0), 1);

        assert_eq!(store.ensure_window(&generator, &window), 9);
        let snapshot = store.get(ChunkCoord::new(1, -1)).cloned();
        assert_eq!(store.ensure_window(&generator, &window), 0);
        assert_eq!(store.len(), 9);
        assert_eq!(store.get(ChunkCoord::new(1, -1)).cloned(), snapshot);
        assert!(!store.ensure_chunk(&generator, ChunkCoord::new(0, 0)));
    }

    #[test]
    fn test_parallel_window_matches_serial_generation() {
        let generator = small_generator();
        let mut store = ChunkStore::new();
        store.ensure_window(&generator, &ChunkWindow::new(ChunkCoord::new(2, 2), 1));

        for coord in store.coords() {
            assert_eq!(store.get(coord), Some(&generator.generate(coord)));
        }
    }

    #[test]
    fn test_evict_outside_window() {
        let generator = small_generator();
        let mut store = ChunkStore::new();
        store.ensure_window(&generator, &ChunkWindow::new(ChunkCoord::new(0, 0), 1));

        let moved = ChunkWindow::new(ChunkCoord::new(1, 0), 1);
        assert_eq!(store.ensure_window(&generator, &moved), 3);
        assert_eq!(store.evict_outside(&moved), 3);
        assert_eq!(store.len(), 9);
        for coord in store.coords() {
            assert!(moved.contains(coord));
        }
        assert!(!store.has_chunk(ChunkCoord::new(-1, 0)));
    }

    #[test]
    fn test_coords_are_sorted_by_row() {
        let generator = small_generator();
        let mut store = ChunkStore::new();
        store.ensure_chunk(&generator, ChunkCoord::new(3, 1));
        store.ensure_chunk(&generator, ChunkCoord::new(-2, 1));
        store.ensure_chunk(&generator, ChunkCoord::new(5, -4));
        assert_eq!(
            store.coords(),
            vec![ChunkCoord::new(5, -4), ChunkCoord::new(-2, 1), ChunkCoord::new(3, 1)]
        );
        store.clear();
        assert!(store.is_empty());
    }
}
