//! Road network generation using A*
//!
//! Connects a settlement's anchor nodes (gates, plaza, town hall, huts) in
//! order of prominence. Stepping onto an existing road is almost free, so
//! later segments follow roads laid by earlier ones instead of cutting new
//! ones.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::biomes::TerrainType;
use crate::coords::LocalCoord;
use crate::objects::{ObjectGrid, PlacedObject};
use crate::structures::types::{AnchorNode, RoadReport};
use crate::tilemap::Tilemap;

/// Cost of one orthogonal step onto open ground.
pub const STRAIGHT_COST: f32 = 10.0;

/// Cost of stepping onto an existing road. Positive so no zero-cost cycles exist.
pub const ROAD_COST: f32 = 0.01;

/// Node for the A* open set
#[derive(Clone, Copy)]
struct PathNode {
    index: usize,
    /// Cost so far plus heuristic
    priority: f32,
    cost: f32,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathNode {}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; deeper nodes first on ties
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.cost.partial_cmp(&other.cost).unwrap_or(Ordering::Equal))
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// A cell roads may cross: flat terrain with only passable objects.
pub fn is_walkable(terrain: &Tilemap<TerrainType>, objects: &ObjectGrid, cell: LocalCoord) -> bool {
    terrain.get(cell.x, cell.y).is_flat() && objects.objects_passable(cell.x, cell.y)
}

/// Cost of moving onto `to`.
fn step_cost(objects: &ObjectGrid, to: LocalCoord) -> f32 {
    if objects.has_road(to.x, to.y) {
        ROAD_COST
    } else {
        STRAIGHT_COST
    }
}

/// Manhattan distance in straight-step units.
fn heuristic(from: LocalCoord, to: LocalCoord) -> f32 {
    from.distance_to(&to) as f32 * STRAIGHT_COST
}

/// Find a 4-connected path from `start` to `goal`, both inclusive.
///
/// Every cell is expanded at most once, so the search visits no more than
/// `width * height` cells.
///
/// The heuristic charges `STRAIGHT_COST` per remaining step, which
/// over-estimates as soon as cheaper road cells exist. Paths then lean
/// towards existing roads but are not guaranteed to be cost-optimal.
pub fn find_path(
    terrain: &Tilemap<TerrainType>,
    objects: &ObjectGrid,
    start: LocalCoord,
    goal: LocalCoord,
) -> Option<Vec<LocalCoord>> {
    let width = terrain.width;
    let cells = width * terrain.height;

    if !is_walkable(terrain, objects, start) || !is_walkable(terrain, objects, goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let index_of = |c: LocalCoord| c.y * width + c.x;
    let coord_of = |i: usize| LocalCoord::new(i % width, i / width);

    let mut best = vec![f32::INFINITY; cells];
    let mut came_from: Vec<Option<usize>> = vec![None; cells];
    let mut closed = vec![false; cells];
    let mut open = BinaryHeap::new();

    let start_idx = index_of(start);
    let goal_idx = index_of(goal);
    best[start_idx] = 0.0;
    open.push(PathNode {
        index: start_idx,
        priority: heuristic(start, goal),
        cost: 0.0,
    });

    while let Some(PathNode { index, cost, .. }) = open.pop() {
        if closed[index] {
            continue;
        }
        closed[index] = true;

        if index == goal_idx {
            let mut path = vec![coord_of(index)];
            let mut current = index;
            while let Some(prev) = came_from[current] {
                path.push(coord_of(prev));
                current = prev;
            }
            path.reverse();
            return Some(path);
        }

        let here = coord_of(index);
        for (nx, ny) in terrain.neighbors(here.x, here.y) {
            let next = LocalCoord::new(nx, ny);
            let next_idx = index_of(next);
            if closed[next_idx] || !is_walkable(terrain, objects, next) {
                continue;
            }

            let new_cost = cost + step_cost(objects, next);
            if new_cost < best[next_idx] {
                best[next_idx] = new_cost;
                came_from[next_idx] = Some(index);
                open.push(PathNode {
                    index: next_idx,
                    priority: new_cost + heuristic(next, goal),
                    cost: new_cost,
                });
            }
        }
    }

    None // No path found
}

/// Put a road on every path cell that lacks one. Returns the number paved.
pub fn pave(objects: &mut ObjectGrid, path: &[LocalCoord]) -> usize {
    let mut paved = 0;
    for cell in path {
        if !objects.has_road(cell.x, cell.y) {
            objects.push(cell.x, cell.y, PlacedObject::Road);
            paved += 1;
        }
    }
    paved
}

/// Order anchors by descending weight; equal weights keep their input order.
pub fn order_anchors(anchors: &[AnchorNode]) -> Vec<AnchorNode> {
    let mut ordered = anchors.to_vec();
    ordered.sort_by(|a, b| b.weight.cmp(&a.weight));
    ordered
}

/// Connect consecutive anchors (heaviest first) and pave the paths.
///
/// A pair without a path is skipped; the remaining pairs are still built.
pub fn generate_road_network(
    anchors: &[AnchorNode],
    terrain: &Tilemap<TerrainType>,
    objects: &mut ObjectGrid,
) -> RoadReport {
    let mut report = RoadReport::default();
    let ordered = order_anchors(anchors);

    for pair in ordered.windows(2) {
        let (from, to) = (pair[0].entry, pair[1].entry);
        match find_path(terrain, objects, from, to) {
            Some(path) => {
                let paved = pave(objects, &path);
                trace!("road {} -> {}: {} cells, {} new", from, to, path.len(), paved);
                report.connected += 1;
                report.paved_cells += paved;
            }
            None => {
                debug!("no road from {} to {}, skipping segment", from, to);
                report.skipped += 1;
            }
        }
    }

    report
}
