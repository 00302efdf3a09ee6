//! Coordinate spaces: world pixels, chunks and cells within a chunk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chunk coordinate (not world coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        ChunkCoord { x, y }
    }

    /// Chebyshev distance, the metric retention windows are square in.
    pub fn chebyshev(&self, other: &ChunkCoord) -> u32 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        dx.max(dy) as u32
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Cell coordinate inside a chunk, each component in `[0, chunk_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalCoord {
    pub x: usize,
    pub y: usize,
}

impl LocalCoord {
    pub fn new(x: usize, y: usize) -> Self {
        LocalCoord { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn distance_to(&self, other: &LocalCoord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for LocalCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// World position in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i64,
    pub y: i64,
}

impl WorldPos {
    pub fn new(x: i64, y: i64) -> Self {
        WorldPos { x, y }
    }
}

/// Converts between world pixels, chunk coordinates and local cells.
///
/// Division is floored so negative positions land in negative chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordSpace {
    /// Pixels per cell edge
    pub cell_size: u32,
    /// Cells per chunk edge
    pub chunk_size: usize,
}

fn saturate(index: i64) -> i32 {
    index.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl CoordSpace {
    pub fn new(cell_size: u32, chunk_size: usize) -> Self {
        Self {
            cell_size: cell_size.max(1),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Pixels per chunk edge
    pub fn chunk_pixels(&self) -> i64 {
        self.cell_size as i64 * self.chunk_size as i64
    }

    /// Chunk containing `pos`. Chunk indices saturate at the `i32` range, so
    /// pixels beyond `i32::MAX * chunk_pixels()` all land in the edge chunk.
    pub fn chunk_of(&self, pos: WorldPos) -> ChunkCoord {
        let span = self.chunk_pixels();
        ChunkCoord::new(saturate(pos.x.div_euclid(span)), saturate(pos.y.div_euclid(span)))
    }

    pub fn local_of(&self, pos: WorldPos) -> LocalCoord {
        let span = self.chunk_pixels();
        let cell = self.cell_size as i64;
        LocalCoord::new(
            (pos.x.rem_euclid(span) / cell) as usize,
            (pos.y.rem_euclid(span) / cell) as usize,
        )
    }

    /// Split a world position into its chunk and cell.
    pub fn split(&self, pos: WorldPos) -> (ChunkCoord, LocalCoord) {
        (self.chunk_of(pos), self.local_of(pos))
    }

    /// Top-left pixel of a cell.
    pub fn to_world(&self, chunk: ChunkCoord, local: LocalCoord) -> WorldPos {
        let span = self.chunk_pixels();
        let cell = self.cell_size as i64;
        WorldPos::new(
            chunk.x as i64 * span + local.x as i64 * cell,
            chunk.y as i64 * span + local.y as i64 * cell,
        )
    }

    /// Top-left pixel of a chunk.
    pub fn chunk_origin(&self, chunk: ChunkCoord) -> WorldPos {
        self.to_world(chunk, LocalCoord::new(0, 0))
    }
}

/// Square block of chunk coordinates centered on the camera chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkWindow {
    pub center: ChunkCoord,
    pub radius: u32,
}

impl ChunkWindow {
    pub fn new(center: ChunkCoord, radius: u32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.center.chebyshev(&coord) <= self.radius
    }

    /// Every coordinate in the window, row by row.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> {
        let r = self.radius as i32;
        let ChunkCoord { x: cx, y: cy } = self.center;
        (cy - r..=cy + r).flat_map(move |y| (cx - r..=cx + r).map(move |x| ChunkCoord::new(x, y)))
    }

    /// Chunks per window edge
    pub fn span(&self) -> usize {
        self.radius as usize * 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_chunk_and_local() {
        let space = CoordSpace::new(32, 50);
        assert_eq!(space.chunk_pixels(), 1600);

        let pos = WorldPos::new(1600 + 65, 31);
        assert_eq!(space.chunk_of(pos), ChunkCoord::new(1, 0));
        assert_eq!(space.local_of(pos), LocalCoord::new(2, 0));
    }

    #[test]
    fn test_negative_positions_floor() {
        let space = CoordSpace::new(32, 50);
        let pos = WorldPos::new(-1, -1600);
        assert_eq!(space.chunk_of(pos), ChunkCoord::new(-1, -1));
        assert_eq!(space.local_of(pos), LocalCoord::new(49, 0));
    }

    #[test]
    fn test_round_trip_through_cells() {
        let space = CoordSpace::new(16, 10);
        for (cx, cy, lx, ly) in [(0, 0, 0, 0), (-3, 2, 9, 4), (5, -7, 1, 9)] {
            let chunk = ChunkCoord::new(cx, cy);
            let local = LocalCoord::new(lx, ly);
            let pos = space.to_world(chunk, local);
            assert_eq!(space.split(pos), (chunk, local));
            // Any pixel inside the cell maps back to it
            let inner = WorldPos::new(pos.x + 15, pos.y + 7);
            assert_eq!(space.split(inner), (chunk, local));
        }
    }

    #[test]
    fn test_window_membership() {
        let window = ChunkWindow::new(ChunkCoord::new(2, -1), 1);
        let coords: Vec<_> = window.coords().collect();
        assert_eq!(coords.len(), 9);
        assert!(coords.iter().all(|c| window.contains(*c)));
        assert!(!window.contains(ChunkCoord::new(4, -1)));
        assert!(window.contains(ChunkCoord::new(3, 0)));
        assert_eq!(coords[0], ChunkCoord::new(1, -2));
    }

    #[test]
    fn test_chunk_of_saturates_far_pixels() {
        let space = CoordSpace::new(32, 50);
        let far = space.chunk_of(WorldPos::new(i64::MAX, i64::MIN));
        assert_eq!(far, ChunkCoord::new(i32::MAX, i32::MIN));

        let edge = WorldPos::new(i32::MAX as i64 * 1600, i32::MIN as i64 * 1600);
        assert_eq!(space.chunk_of(edge), ChunkCoord::new(i32::MAX, i32::MIN));
        let inside = WorldPos::new(edge.x - 1, edge.y + 1600);
        assert_eq!(space.chunk_of(inside), ChunkCoord::new(i32::MAX - 1, i32::MIN + 1));
    }
}
