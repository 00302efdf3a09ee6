//! Deterministic coherent-noise sampling
//!
//! A `NoiseField` is a fractal sum of Perlin octaves. Blocks are sampled on an
//! absolute integer lattice scaled by an interval, so two blocks that touch in
//! sample space join without a seam. A normalized field divides the sum by the
//! total octave amplitude, keeping it in `[-1, 1]` whatever the persistence.

use noise::{NoiseFn, Perlin};

use crate::tilemap::Tilemap;

/// Rescale a multiplier sample into a relief factor in `[0, ~1]`.
pub fn relief_factor(sample: f64) -> f64 {
    (sample + 1.0).max(0.0) / 2.5
}

/// A seeded multi-octave Perlin field.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
    persistence: f64,
    octaves: u32,
    normalized: bool,
}

impl NoiseField {
    /// Create a field. `octaves` is clamped to at least one.
    pub fn new(seed: u64, persistence: f64, octaves: u32) -> Self {
        // Fold the high half in so seeds differing only above bit 32 still diverge
        let seed = (seed ^ (seed >> 32)) as u32;
        Self {
            perlin: Perlin::new(seed),
            seed,
            persistence,
            octaves: octaves.max(1),
            normalized: false,
        }
    }

    /// Divide samples by the amplitude sum.
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Sum of the octave amplitudes, `1 + p + p^2 + ...`.
    pub fn amplitude_sum(&self) -> f64 {
        (0..self.octaves).map(|i| self.persistence.powi(i as i32)).sum()
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field at a point.
    ///
    /// Octave `i` runs at frequency `2^i` with amplitude `persistence^i`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;

        for _ in 0..self.octaves {
            total += amplitude * self.perlin.get([x * frequency, y * frequency]);
            amplitude *= self.persistence;
            frequency *= 2.0;
        }

        if self.normalized {
            total / self.amplitude_sum()
        } else {
            total
        }
    }

    /// Sample a `width × height` block.
    ///
    /// Cell `(i, j)` is sampled at `((origin_x + i) * interval, (origin_y + j) * interval)`.
    pub fn sample_block(
        &self,
        origin_x: i64,
        origin_y: i64,
        width: usize,
        height: usize,
        interval: f64,
    ) -> Tilemap<f64> {
        Tilemap::from_fn(width, height, |i, j| {
            let sx = (origin_x + i as i64) as f64 * interval;
            let sy = (origin_y + j as i64) as f64 * interval;
            self.sample(sx, sy)
        })
    }
}
