//! A generated chunk: terrain, stacked objects and the settlement summary.

use crate::biomes::TerrainType;
use crate::coords::{ChunkCoord, LocalCoord};
use crate::objects::{ObjectGrid, PlacedObject};
use crate::structures::types::Settlement;
use crate::tilemap::Tilemap;

/// A fully generated chunk. Only the generator can mutate one; the rest of
/// the crate sees it through shared references.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub(crate) terrain: Tilemap<TerrainType>,
    pub(crate) objects: ObjectGrid,
    pub(crate) settlement: Option<Settlement>,
}

impl Chunk {
    pub(crate) fn new(coord: ChunkCoord, terrain: Tilemap<TerrainType>) -> Self {
        let size = terrain.width;
        Self {
            coord,
            terrain,
            objects: ObjectGrid::new(size),
            settlement: None,
        }
    }

    /// Cells per chunk edge
    pub fn size(&self) -> usize {
        self.terrain.width
    }

    pub fn terrain(&self) -> &Tilemap<TerrainType> {
        &self.terrain
    }

    pub fn objects(&self) -> &ObjectGrid {
        &self.objects
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn terrain_at(&self, local: LocalCoord) -> TerrainType {
        *self.terrain.get(local.x, local.y)
    }

    pub fn objects_at(&self, local: LocalCoord) -> &[PlacedObject] {
        self.objects.get(local.x, local.y)
    }

    /// Terrain does not block and every object on the cell is passable.
    pub fn is_passable(&self, local: LocalCoord) -> bool {
        !self.terrain_at(local).is_blocking() && self.objects.objects_passable(local.x, local.y)
    }

    /// Color of the topmost object, or of the terrain when the cell is empty.
    pub fn cell_color(&self, local: LocalCoord) -> (u8, u8, u8) {
        match self.objects.top(local.x, local.y) {
            Some(object) => {
                let (r, g, b, _) = object.color();
                (r, g, b)
            }
            None => self.terrain_at(local).color(),
        }
    }

    /// Character of the topmost object, or of the terrain.
    pub fn cell_char(&self, local: LocalCoord) -> char {
        self.objects
            .top(local.x, local.y)
            .map(|o| o.ascii_char())
            .unwrap_or_else(|| self.terrain_at(local).ascii_char())
    }

    /// Count of cells per terrain type, indexed like `TerrainType::ALL`.
    pub fn terrain_histogram(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for (_, _, terrain) in self.terrain.iter() {
            if let Some(i) = TerrainType::ALL.iter().position(|t| t == terrain) {
                counts[i] += 1;
            }
        }
        counts
    }
}
