//! Settlement generation
//!
//! Runs once per chunk after terrain and scatter are final:
//! 1. Scan rings around the chunk center for flat ground
//! 2. Lay out the wall ring, gates, plaza, town hall and huts
//! 3. Connect the anchor nodes with roads

pub mod generation;
pub mod placement;
pub mod types;

use rand_chacha::ChaCha8Rng;

use crate::biomes::TerrainType;
use crate::config::TownParams;
use crate::objects::ObjectGrid;
use crate::tilemap::Tilemap;

use generation::{generate_road_network, generate_town};
use types::Settlement;

/// Place a town and its roads, if the chunk has room for one.
pub fn generate_settlement(
    terrain: &Tilemap<TerrainType>,
    objects: &mut ObjectGrid,
    params: &TownParams,
    rng: &mut ChaCha8Rng,
) -> Option<Settlement> {
    let mut settlement = generate_town(terrain, objects, params, rng)?;
    settlement.roads = generate_road_network(&settlement.anchors(), terrain, objects);
    Some(settlement)
}
