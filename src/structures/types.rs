//! Settlement types and definitions

use serde::{Deserialize, Serialize};

use crate::coords::LocalCoord;

/// Kind of building inside a town wall
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Open square paved with road
    Plaza,
    /// The largest hollow building, placed once
    TownHall,
    /// Small hollow dwelling
    Hut,
}

impl BuildingKind {
    /// Half extents range `(min, max)` a proposal draws from, per axis.
    pub fn half_extent_range(&self) -> (usize, usize) {
        match self {
            BuildingKind::Plaza => (1, 3),
            BuildingKind::TownHall => (2, 4),
            BuildingKind::Hut => (1, 2),
        }
    }

    pub fn is_hollow(&self) -> bool {
        !matches!(self, BuildingKind::Plaza)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingKind::Plaza => "Plaza",
            BuildingKind::TownHall => "Town Hall",
            BuildingKind::Hut => "Hut",
        }
    }
}

/// Axis-aligned rectangle of cells, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CellRect {
    /// Rectangle centered on `(cx, cy)` reaching `half_w`/`half_h` cells out.
    pub fn centered(cx: i64, cy: i64, half_w: usize, half_h: usize) -> Self {
        Self {
            x0: cx - half_w as i64,
            y0: cy - half_h as i64,
            x1: cx + half_w as i64,
            y1: cy + half_h as i64,
        }
    }

    pub fn width(&self) -> usize {
        (self.x1 - self.x0 + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.y1 - self.y0 + 1) as usize
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn center(&self) -> (i64, i64) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    /// Grow by `margin` cells on every side.
    pub fn padded(&self, margin: i64) -> Self {
        Self {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn contains_rect(&self, other: &CellRect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    pub fn intersects(&self, other: &CellRect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    pub fn is_border(&self, x: i64, y: i64) -> bool {
        self.contains(x, y) && (x == self.x0 || x == self.x1 || y == self.y0 || y == self.y1)
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..=self.y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }

    /// Border cells only, row by row.
    pub fn border_cells(&self) -> impl Iterator<Item = (i64, i64)> {
        let rect = *self;
        self.cells().filter(move |&(x, y)| rect.is_border(x, y))
    }

    /// Midpoints of the four sides: top, bottom, left, right.
    pub fn side_midpoints(&self) -> [(i64, i64); 4] {
        let (cx, cy) = self.center();
        [(cx, self.y0), (cx, self.y1), (self.x0, cy), (self.x1, cy)]
    }
}

/// A building committed to a chunk's object grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub footprint: CellRect,
    /// Door cells in the order they were cut; empty for plazas
    pub doors: Vec<LocalCoord>,
}

impl Building {
    /// Where roads attach: the first door, or the center for open buildings.
    pub fn entry(&self) -> LocalCoord {
        self.doors.first().copied().unwrap_or_else(|| {
            let (cx, cy) = self.footprint.center();
            LocalCoord::new(cx as usize, cy as usize)
        })
    }

    pub fn anchor(&self) -> AnchorNode {
        let (cx, cy) = self.footprint.center();
        AnchorNode {
            cell: LocalCoord::new(cx as usize, cy as usize),
            entry: self.entry(),
            weight: self.footprint.area(),
        }
    }
}

/// Road endpoint produced while laying out a settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorNode {
    /// Cell the feature is centered on
    pub cell: LocalCoord,
    /// Cell roads connect to
    pub entry: LocalCoord,
    /// Prominence; larger anchors are connected first
    pub weight: usize,
}

impl AnchorNode {
    /// Single-cell anchor such as a gate.
    pub fn point(cell: LocalCoord) -> Self {
        Self {
            cell,
            entry: cell,
            weight: 1,
        }
    }
}

/// Outcome of road planning for one settlement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadReport {
    /// Consecutive anchor pairs joined by a path
    pub connected: usize,
    /// Pairs with no path between them
    pub skipped: usize,
    /// Cells that received a new road
    pub paved_cells: usize,
}

/// A walled town placed in a chunk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub center: LocalCoord,
    /// Largest ring radius that was entirely flat
    pub safe_radius: usize,
    /// Radius of the wall ring
    pub radius: usize,
    pub gates: [LocalCoord; 2],
    pub buildings: Vec<Building>,
    pub roads: RoadReport,
}

impl Settlement {
    /// The wall ring as a rectangle.
    pub fn ring(&self) -> CellRect {
        CellRect::centered(self.center.x as i64, self.center.y as i64, self.radius, self.radius)
    }

    pub fn plaza(&self) -> Option<&Building> {
        self.buildings.iter().find(|b| b.kind == BuildingKind::Plaza)
    }

    pub fn town_hall(&self) -> Option<&Building> {
        self.buildings.iter().find(|b| b.kind == BuildingKind::TownHall)
    }

    pub fn huts(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().filter(|b| b.kind == BuildingKind::Hut)
    }

    /// Anchor nodes for road planning: gates first, then buildings in
    /// placement order.
    pub fn anchors(&self) -> Vec<AnchorNode> {
        self.gates
            .iter()
            .map(|g| AnchorNode::point(*g))
            .chain(self.buildings.iter().map(Building::anchor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = CellRect::centered(10, 10, 2, 1);
        assert_eq!((rect.width(), rect.height(), rect.area()), (5, 3, 15));
        assert_eq!(rect.center(), (10, 10));
        assert_eq!(rect.border_cells().count(), 12);
        assert_eq!(rect.padded(1).area(), 7 * 5);
        assert!(rect.padded(1).contains_rect(&rect));
        assert!(!rect.intersects(&CellRect::centered(14, 10, 1, 1)));
        assert!(rect.intersects(&CellRect::centered(13, 10, 1, 1)));
    }

    #[test]
    fn test_building_anchor_uses_first_door() {
        let hut = Building {
            kind: BuildingKind::Hut,
            footprint: CellRect::centered(5, 5, 1, 1),
            doors: vec![LocalCoord::new(5, 6), LocalCoord::new(4, 5)],
        };
        let anchor = hut.anchor();
        assert_eq!(anchor.entry, LocalCoord::new(5, 6));
        assert_eq!(anchor.cell, LocalCoord::new(5, 5));
        assert_eq!(anchor.weight, 9);

        let plaza = Building {
            kind: BuildingKind::Plaza,
            footprint: CellRect::centered(8, 8, 2, 2),
            doors: Vec::new(),
        };
        assert_eq!(plaza.entry(), LocalCoord::new(8, 8));
    }
}
