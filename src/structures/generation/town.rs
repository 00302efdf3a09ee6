//! Walled town layout
//!
//! A town is a square wall ring around the chunk center with two gates, a
//! paved plaza, a town hall and a handful of huts. Interior buildings are
//! proposed at random and only committed when their padded footprint is free.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::biomes::TerrainType;
use crate::config::TownParams;
use crate::coords::LocalCoord;
use crate::naming::settlement_name;
use crate::objects::{ObjectGrid, PlacedObject};
use crate::structures::placement::{
    max_scan_radius, room_for_building, safe_radius, BUILDING_PADDING,
};
use crate::structures::types::{Building, BuildingKind, CellRect, RoadReport, Settlement};
use crate::tilemap::Tilemap;

/// Lay out a town in the chunk if the terrain around its center allows one.
///
/// Returns `None` (and leaves `objects` untouched) when the safe radius is
/// below `params.min_radius`.
pub fn generate_town(
    terrain: &Tilemap<TerrainType>,
    objects: &mut ObjectGrid,
    params: &TownParams,
    rng: &mut ChaCha8Rng,
) -> Option<Settlement> {
    let size = terrain.width;
    let center = (size / 2, size / 2);
    let safe = safe_radius(terrain, center, max_scan_radius(size));

    if safe < params.min_radius {
        trace!("safe radius {} below {}, no town", safe, params.min_radius);
        return None;
    }

    let radius = rng.gen_range(params.min_radius..=safe);
    let ring = CellRect::centered(center.0 as i64, center.1 as i64, radius, radius);

    // The town clears whatever grew inside its footprint
    for (x, y) in ring.cells() {
        objects.clear_cell(x as usize, y as usize);
    }

    let gates = [
        LocalCoord::new(center.0 - radius, center.1),
        LocalCoord::new(center.0, center.1 + radius),
    ];
    build_wall_ring(objects, &ring, &gates);

    let mut buildings = Vec::new();
    place_buildings(BuildingKind::Plaza, 1, &ring, objects, params, rng, &mut buildings);
    place_buildings(BuildingKind::TownHall, 1, &ring, objects, params, rng, &mut buildings);

    let hut_target = rng.gen_range(params.hut_count_min..=params.hut_count_max);
    let huts = place_buildings(BuildingKind::Hut, hut_target, &ring, objects, params, rng, &mut buildings);
    if huts < hut_target {
        debug!("placed {}/{} huts before running out of retries", huts, hut_target);
    }

    let name = settlement_name(rng);
    debug!(
        "town {} radius {} (safe {}), {} buildings",
        name,
        radius,
        safe,
        buildings.len()
    );

    Some(Settlement {
        name,
        center: LocalCoord::new(center.0, center.1),
        safe_radius: safe,
        radius,
        gates,
        buildings,
        roads: RoadReport::default(),
    })
}

/// Wall every border cell of the ring, except gates which get a road.
fn build_wall_ring(objects: &mut ObjectGrid, ring: &CellRect, gates: &[LocalCoord; 2]) {
    for (x, y) in ring.border_cells() {
        let (x, y) = (x as usize, y as usize);
        let object = if gates.contains(&LocalCoord::new(x, y)) {
            PlacedObject::Road
        } else {
            PlacedObject::Wall
        };
        objects.push(x, y, object);
    }
}

/// Place up to `target` buildings of one kind, appending them to `buildings`.
/// Returns how many were placed.
///
/// Every rejected proposal consumes one retry from a budget shared by the
/// whole batch; once it is spent the remaining buildings are skipped.
fn place_buildings(
    kind: BuildingKind,
    target: usize,
    ring: &CellRect,
    objects: &mut ObjectGrid,
    params: &TownParams,
    rng: &mut ChaCha8Rng,
    buildings: &mut Vec<Building>,
) -> usize {
    let mut placed = 0;
    let mut retries = 0;

    while placed < target && retries < params.max_placement_retries {
        match try_place(kind, ring, objects, buildings, params, rng) {
            Some(building) => {
                buildings.push(building);
                placed += 1;
            }
            None => retries += 1,
        }
    }

    if placed == 0 && target > 0 {
        debug!("{} not placed after {} retries", kind.display_name(), retries);
    }
    placed
}

/// One placement attempt. The grid is only written when the proposal fits.
fn try_place(
    kind: BuildingKind,
    ring: &CellRect,
    objects: &mut ObjectGrid,
    existing: &[Building],
    params: &TownParams,
    rng: &mut ChaCha8Rng,
) -> Option<Building> {
    let footprint = propose_footprint(kind, ring, rng);
    if !room_for_building(objects, &footprint, ring) {
        return None;
    }
    // Hollow interiors hold no objects but are still taken
    let padded = footprint.padded(BUILDING_PADDING);
    if existing.iter().any(|b| b.footprint.intersects(&padded)) {
        return None;
    }

    let doors = if kind.is_hollow() {
        choose_doors(&footprint, params.door_chance, rng)
    } else {
        Vec::new()
    };
    commit(kind, &footprint, &doors, objects);

    Some(Building {
        kind,
        footprint,
        doors,
    })
}

/// Random footprint for `kind` somewhere inside the ring.
fn propose_footprint(kind: BuildingKind, ring: &CellRect, rng: &mut ChaCha8Rng) -> CellRect {
    let (min, max) = kind.half_extent_range();
    let half_w = rng.gen_range(min..=max);
    let half_h = rng.gen_range(min..=max);

    let (cx, cy) = ring.center();
    let reach = (ring.width() as i64 - 1) / 2 - 1;
    // Plazas stay close to the middle of town
    let reach = match kind {
        BuildingKind::Plaza => (reach / 4).max(0),
        _ => reach.max(0),
    };

    let dx = rng.gen_range(-reach..=reach);
    let dy = rng.gen_range(-reach..=reach);
    CellRect::centered(cx + dx, cy + dy, half_w, half_h)
}

/// Pick door cells among the side midpoints, guaranteeing at least one.
fn choose_doors(footprint: &CellRect, door_chance: f64, rng: &mut ChaCha8Rng) -> Vec<LocalCoord> {
    let candidates = footprint.side_midpoints();
    let mut doors: Vec<LocalCoord> = candidates
        .iter()
        .filter(|_| rng.gen_bool(door_chance))
        .map(|&(x, y)| LocalCoord::new(x as usize, y as usize))
        .collect();

    if doors.is_empty() {
        let (x, y) = candidates[rng.gen_range(0..candidates.len())];
        doors.push(LocalCoord::new(x as usize, y as usize));
    }
    doors
}

fn commit(kind: BuildingKind, footprint: &CellRect, doors: &[LocalCoord], objects: &mut ObjectGrid) {
    if !kind.is_hollow() {
        for (x, y) in footprint.cells() {
            objects.push(x as usize, y as usize, PlacedObject::Road);
        }
        return;
    }

    for (x, y) in footprint.border_cells() {
        let (x, y) = (x as usize, y as usize);
        let object = if doors.contains(&LocalCoord::new(x, y)) {
            PlacedObject::Road
        } else {
            PlacedObject::Wall
        };
        objects.push(x, y, object);
    }
}
