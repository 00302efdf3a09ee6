//! Town feasibility and collision checks
//!
//! Towns need a square of flat ground around the chunk center, and every
//! building needs a one-cell margin free of objects before it is committed.

use crate::biomes::TerrainType;
use crate::objects::ObjectGrid;
use crate::tilemap::Tilemap;

use super::types::CellRect;

/// Empty border every building keeps around its footprint.
pub const BUILDING_PADDING: i64 = 1;

/// Largest ring radius that still fits inside a chunk of `chunk_size` cells.
pub fn max_scan_radius(chunk_size: usize) -> usize {
    (chunk_size / 2).saturating_sub(1)
}

/// Check that every border cell of the square ring of `radius` around
/// `center` lies in the chunk and is flat.
pub fn ring_is_flat(terrain: &Tilemap<TerrainType>, center: (usize, usize), radius: usize) -> bool {
    let ring = CellRect::centered(center.0 as i64, center.1 as i64, radius, radius);
    ring.border_cells()
        .all(|(x, y)| terrain.in_bounds(x, y) && terrain.get(x as usize, y as usize).is_flat())
}

/// Grow rings outward from `center` and return the largest radius for which
/// every ring up to it is flat (0 when even the first ring fails).
pub fn safe_radius(terrain: &Tilemap<TerrainType>, center: (usize, usize), max_radius: usize) -> usize {
    (1..=max_radius)
        .take_while(|&r| ring_is_flat(terrain, center, r))
        .last()
        .unwrap_or(0)
}

/// Check whether `footprint` plus its padding fits inside `bounds`, inside the
/// grid, and covers no existing object.
pub fn room_for_building(objects: &ObjectGrid, footprint: &CellRect, bounds: &CellRect) -> bool {
    let padded = footprint.padded(BUILDING_PADDING);
    let size = objects.size() as i64;

    if !bounds.contains_rect(&padded) {
        return false;
    }
    if padded.x0 < 0 || padded.y0 < 0 || padded.x1 >= size || padded.y1 >= size {
        return false;
    }

    padded
        .cells()
        .all(|(x, y)| objects.is_empty_at(x as usize, y as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::PlacedObject;

    fn island(size: usize, flat_radius: usize) -> Tilemap<TerrainType> {
        let c = (size / 2) as i64;
        Tilemap::from_fn(size, size, |x, y| {
            let d = (x as i64 - c).abs().max((y as i64 - c).abs());
            if d <= flat_radius as i64 {
                TerrainType::Grass
            } else {
                TerrainType::DeepWater
            }
        })
    }

    #[test]
    fn test_safe_radius_stops_at_first_bad_ring() {
        let terrain = island(50, 12);
        assert_eq!(safe_radius(&terrain, (25, 25), max_scan_radius(50)), 12);

        let mut terrain = island(50, 20);
        terrain.set(25 + 7, 25, TerrainType::Mountain);
        assert_eq!(safe_radius(&terrain, (25, 25), 24), 6);
    }

    #[test]
    fn test_safe_radius_capped_by_chunk() {
        let terrain = Tilemap::new_with(50, 50, TerrainType::Sand);
        assert_eq!(max_scan_radius(50), 24);
        assert_eq!(safe_radius(&terrain, (25, 25), max_scan_radius(50)), 24);
    }

    #[test]
    fn test_safe_radius_zero_when_center_ring_fails() {
        let terrain = island(50, 0);
        assert_eq!(safe_radius(&terrain, (25, 25), 24), 0);
    }

    #[test]
    fn test_room_requires_free_padding() {
        let mut objects = ObjectGrid::new(20);
        let bounds = CellRect::centered(10, 10, 9, 9);
        let hut = CellRect::centered(10, 10, 1, 1);
        assert!(room_for_building(&objects, &hut, &bounds));

        // An object just outside the footprint sits in the padding
        objects.push(12, 10, PlacedObject::Road);
        assert!(!room_for_building(&objects, &hut, &bounds));

        // Two cells away is fine
        let shifted = CellRect::centered(8, 10, 1, 1);
        assert!(!room_for_building(&objects, &CellRect::centered(10, 11, 1, 1), &bounds));
        assert!(room_for_building(&objects, &shifted, &bounds));
    }

    #[test]
    fn test_room_respects_bounds() {
        let objects = ObjectGrid::new(20);
        let bounds = CellRect::centered(10, 10, 4, 4);
        assert!(room_for_building(&objects, &CellRect::centered(10, 10, 2, 2), &bounds));
        assert!(!room_for_building(&objects, &CellRect::centered(12, 10, 2, 2), &bounds));
    }
}
