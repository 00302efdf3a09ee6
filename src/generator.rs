//! Chunk generation
//!
//! A chunk is a pure function of the world seed, its coordinate and the
//! generator parameters: terrain from two noise fields, then scattered
//! vegetation and caves, then a town and its roads. All randomness comes from
//! one RNG seeded per chunk.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::biomes::{classify, TerrainType};
use crate::chunk::Chunk;
use crate::config::{GeneratorParams, TownParams, WorldConfig};
use crate::coords::ChunkCoord;
use crate::noise_field::{relief_factor, NoiseField};
use crate::objects::{ObjectGrid, PlacedObject};
use crate::seeds::WorldSeeds;
use crate::structures::generate_settlement;
use crate::tilemap::Tilemap;

/// Immutable chunk factory; safe to share across threads.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    seeds: WorldSeeds,
    chunk_size: usize,
    params: GeneratorParams,
    town: TownParams,
    base: NoiseField,
    multiplier: NoiseField,
}

impl ChunkGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        let config = config.clone().sanitized();
        let seeds = WorldSeeds::from_master(config.seed);
        let params = config.generator;
        let base = NoiseField::new(seeds.terrain, params.persistence, params.base_octaves()).normalized();
        let multiplier = NoiseField::new(seeds.multiplier, params.persistence, params.octave);

        Self {
            seeds,
            chunk_size: config.chunk_size,
            params,
            town: config.town,
            base,
            multiplier,
        }
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Relief-scaled noise samples covering `coord`, plus `extra` samples
    /// past the right and bottom edges.
    ///
    /// The normalized base field is scaled to `elevation` and then damped by
    /// the multiplier field, which varies over a much longer wavelength: low
    /// multiplier regions flatten into sand and grass plains, high ones keep
    /// the full relief of water and mountains.
    pub fn sample_relief(&self, coord: ChunkCoord, extra: usize) -> Tilemap<f64> {
        let size = self.chunk_size;
        let span = size + extra;
        let origin_x = coord.x as i64 * size as i64;
        let origin_y = coord.y as i64 * size as i64;
        let params = &self.params;

        let base = self.base.sample_block(
            origin_x,
            origin_y,
            span,
            span,
            params.interval / params.terrain_wavelength,
        );
        let relief = self.multiplier.sample_block(
            origin_x,
            origin_y,
            span,
            span,
            params.interval / params.relief_wavelength,
        );

        Tilemap::from_fn(span, span, |x, y| {
            params.elevation * *base.get(x, y) * relief_factor(*relief.get(x, y))
        })
    }

    /// Terrain of a chunk.
    pub fn terrain(&self, coord: ChunkCoord) -> Tilemap<TerrainType> {
        let samples = self.sample_relief(coord, 0);
        Tilemap::from_fn(samples.width, samples.height, |x, y| classify(*samples.get(x, y)))
    }

    /// Generate a complete chunk: terrain, scatter, settlement and roads.
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut rng = self.seeds.chunk_rng(coord);
        let mut chunk = Chunk::new(coord, self.terrain(coord));

        scatter(&chunk.terrain, &mut chunk.objects, &self.params, &mut rng);
        chunk.settlement = generate_settlement(&chunk.terrain, &mut chunk.objects, &self.town, &mut rng);

        debug!(
            "generated chunk {} ({} objects{})",
            coord,
            chunk.objects.object_count(),
            chunk
                .settlement
                .as_ref()
                .map(|s| format!(", town {}", s.name))
                .unwrap_or_default()
        );
        chunk
    }
}

/// Trees on grass, and cave entrances on grass at the foot of a mountain.
fn scatter(
    terrain: &Tilemap<TerrainType>,
    objects: &mut ObjectGrid,
    params: &GeneratorParams,
    rng: &mut ChaCha8Rng,
) {
    for y in 0..terrain.height {
        for x in 0..terrain.width {
            if *terrain.get(x, y) != TerrainType::Grass {
                continue;
            }

            if rng.gen_bool(params.tree_chance) {
                objects.push(x, y, PlacedObject::Tree);
                continue;
            }

            let foot_of_mountain = terrain
                .neighbors(x, y)
                .any(|(nx, ny)| *terrain.get(nx, ny) == TerrainType::Mountain);
            if foot_of_mountain && rng.gen_bool(params.cave_chance) {
                objects.push(x, y, PlacedObject::CaveEntrance);
            }
        }
    }
}
