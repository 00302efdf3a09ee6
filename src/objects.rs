//! Objects placed on terrain cells (walls, roads, trees, cave entrances).

use serde::{Deserialize, Serialize};

/// An object occupying a cell. Several may stack on one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacedObject {
    Wall,
    Road,
    Tree,
    CaveEntrance,
}

impl PlacedObject {
    pub fn passable(&self) -> bool {
        match self {
            PlacedObject::Wall | PlacedObject::Tree => false,
            PlacedObject::Road | PlacedObject::CaveEntrance => true,
        }
    }

    /// Higher draws on top.
    pub fn draw_priority(&self) -> u8 {
        match self {
            PlacedObject::Road => 1,
            PlacedObject::Wall | PlacedObject::Tree | PlacedObject::CaveEntrance => 3,
        }
    }

    /// RGBA display color
    pub fn color(&self) -> (u8, u8, u8, u8) {
        match self {
            PlacedObject::Wall => (97, 92, 84, 200),
            PlacedObject::Road => (161, 131, 76, 200),
            PlacedObject::Tree => (11, 140, 82, 200),
            PlacedObject::CaveEntrance => (20, 20, 20, 200),
        }
    }

    pub fn ascii_char(&self) -> char {
        match self {
            PlacedObject::Wall => '#',
            PlacedObject::Road => '=',
            PlacedObject::Tree => 'T',
            PlacedObject::CaveEntrance => 'O',
        }
    }
}

/// Dense per-chunk object storage, one stack per cell, addressed by
/// `y * size + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectGrid {
    size: usize,
    cells: Vec<Vec<PlacedObject>>,
}

impl ObjectGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Vec::new(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "({x}, {y}) out of bounds");
        y * self.size + x
    }

    /// Objects on a cell, in insertion order.
    pub fn get(&self, x: usize, y: usize) -> &[PlacedObject] {
        &self.cells[self.index(x, y)]
    }

    pub fn push(&mut self, x: usize, y: usize, object: PlacedObject) {
        let idx = self.index(x, y);
        self.cells[idx].push(object);
    }

    pub fn clear_cell(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.cells[idx].clear();
    }

    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_empty()
    }

    /// True when every object on the cell is passable (vacuously for empty cells).
    pub fn objects_passable(&self, x: usize, y: usize) -> bool {
        self.get(x, y).iter().all(PlacedObject::passable)
    }

    pub fn has(&self, x: usize, y: usize, object: PlacedObject) -> bool {
        self.get(x, y).contains(&object)
    }

    pub fn has_road(&self, x: usize, y: usize) -> bool {
        self.has(x, y, PlacedObject::Road)
    }

    /// The object drawn on top; later insertions win ties.
    pub fn top(&self, x: usize, y: usize) -> Option<PlacedObject> {
        self.get(x, y)
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(i, o)| (o.draw_priority(), *i))
            .map(|(_, o)| o)
    }

    /// Total number of objects placed.
    pub fn object_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn count(&self, object: PlacedObject) -> usize {
        self.cells
            .iter()
            .map(|stack| stack.iter().filter(|o| **o == object).count())
            .sum()
    }

    /// Iterate over non-empty cells as `(x, y, objects)`.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, usize, &[PlacedObject])> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stack)| !stack.is_empty())
            .map(move |(idx, stack)| (idx % size, idx / size, stack.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_passability_is_conjunction() {
        let mut grid = ObjectGrid::new(4);
        assert!(grid.objects_passable(1, 1));
        grid.push(1, 1, PlacedObject::Road);
        assert!(grid.objects_passable(1, 1));
        grid.push(1, 1, PlacedObject::Tree);
        assert!(!grid.objects_passable(1, 1));
        assert_eq!(grid.get(1, 1), &[PlacedObject::Road, PlacedObject::Tree]);
    }

    #[test]
    fn test_top_prefers_priority_then_latest() {
        let mut grid = ObjectGrid::new(2);
        grid.push(0, 0, PlacedObject::Wall);
        grid.push(0, 0, PlacedObject::Road);
        assert_eq!(grid.top(0, 0), Some(PlacedObject::Wall));
        grid.push(0, 0, PlacedObject::Tree);
        assert_eq!(grid.top(0, 0), Some(PlacedObject::Tree));
        assert_eq!(grid.top(1, 1), None);
    }

    #[test]
    fn test_iter_occupied_reports_coordinates() {
        let mut grid = ObjectGrid::new(3);
        grid.push(2, 1, PlacedObject::CaveEntrance);
        let occupied: Vec<_> = grid.iter_occupied().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(occupied, vec![(2, 1)]);
        assert_eq!(grid.object_count(), 1);
        grid.clear_cell(2, 1);
        assert_eq!(grid.object_count(), 0);
    }
}
