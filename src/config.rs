//! Configuration for world generation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, WorldError};

/// Noise and scatter parameters. Changing any of these invalidates all
/// generated terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// Amplitude falloff per octave (default: 1.34).
    pub persistence: f64,

    /// Octave count of the multiplier field; the base field uses two more
    /// (default: 3, minimum 1).
    pub octave: u32,

    /// Noise-space distance between adjacent cells (default: 0.08).
    pub interval: f64,

    /// Noise-space units per lattice unit of the base field (default: 8.0).
    /// Larger values give broader landforms.
    pub terrain_wavelength: f64,

    /// Noise-space units per lattice unit of the multiplier field
    /// (default: 24.0). Sets the size of plains and highland regions.
    pub relief_wavelength: f64,

    /// Peak height of the normalized base field before relief (default: 8.0).
    pub elevation: f64,

    /// Probability that a grass cell grows a tree.
    pub tree_chance: f64,

    /// Probability that a grass cell at the foot of a mountain opens a cave.
    pub cave_chance: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            persistence: 1.34,
            octave: 3,
            interval: 0.08,
            terrain_wavelength: 8.0,
            relief_wavelength: 24.0,
            elevation: 8.0,
            tree_chance: 0.04,
            cave_chance: 0.02,
        }
    }
}

impl GeneratorParams {
    /// Octave count of the base field.
    pub fn base_octaves(&self) -> u32 {
        self.octave.max(1) + 2
    }

    /// Clamp out-of-range values to the nearest valid setting.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.octave < 1 {
            warn!("octave {} below minimum, clamping to 1", self.octave);
            self.octave = 1;
        }
        if !self.persistence.is_finite() {
            warn!("invalid persistence {}, using {}", self.persistence, defaults.persistence);
            self.persistence = defaults.persistence;
        } else if self.persistence < 0.0 {
            warn!("persistence {} below minimum, clamping to 0", self.persistence);
            self.persistence = 0.0;
        }
        self.interval = positive_or("interval", self.interval, defaults.interval);
        self.terrain_wavelength = positive_or("terrain_wavelength", self.terrain_wavelength, defaults.terrain_wavelength);
        self.relief_wavelength = positive_or("relief_wavelength", self.relief_wavelength, defaults.relief_wavelength);
        self.elevation = positive_or("elevation", self.elevation, defaults.elevation);
        self.tree_chance = clamp_probability(self.tree_chance);
        self.cave_chance = clamp_probability(self.cave_chance);
        self
    }
}

/// Settlement layout parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownParams {
    /// Smallest wall radius a town may have; the safe radius must reach it.
    pub min_radius: usize,

    /// Failed proposals allowed per building kind before giving up.
    pub max_placement_retries: u32,

    /// Minimum number of huts attempted.
    pub hut_count_min: usize,

    /// Maximum number of huts attempted.
    pub hut_count_max: usize,

    /// Probability that each side midpoint of a building becomes a door.
    pub door_chance: f64,
}

impl Default for TownParams {
    fn default() -> Self {
        Self {
            min_radius: 10,
            max_placement_retries: 14,
            hut_count_min: 3,
            hut_count_max: 8,
            door_chance: 0.25,
        }
    }
}

impl TownParams {
    pub fn sanitized(mut self) -> Self {
        self.min_radius = self.min_radius.max(3);
        if self.hut_count_max < self.hut_count_min {
            self.hut_count_max = self.hut_count_min;
        }
        self.door_chance = clamp_probability(self.door_chance);
        self
    }
}

/// Top-level world configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed; immutable once the world is built.
    pub seed: u64,

    /// Cells per chunk edge (default: 50).
    pub chunk_size: usize,

    /// Pixels per cell edge (default: 32).
    pub cell_size: u32,

    /// Chunks kept resident on each side of the camera chunk (default: 1).
    pub retention_radius: u32,

    pub generator: GeneratorParams,

    pub town: TownParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            chunk_size: 50,
            cell_size: 32,
            retention_radius: 1,
            generator: GeneratorParams::default(),
            town: TownParams::default(),
        }
    }
}

impl WorldConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorldError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.chunk_size = self.chunk_size.max(1);
        self.cell_size = self.cell_size.max(1);
        self.generator = self.generator.sanitized();
        self.town = self.town.sanitized();
        self
    }
}

fn positive_or(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("invalid {} {}, using {}", name, value, fallback);
        fallback
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = WorldConfig::default();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.generator.octave, 3);
        assert_eq!(config.generator.base_octaves(), 5);
        assert_eq!(config.generator.interval, 0.08);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = WorldConfig::from_json_str(r#"{"seed": 7, "generator": {"octave": 0}}"#)
            .expect("valid json");
        assert_eq!(config.seed, 7);
        assert_eq!(config.generator.octave, 1);
        assert_eq!(config.generator.persistence, 1.34);
        assert_eq!(config.town, TownParams::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = WorldConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, WorldError::ConfigParse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = WorldConfig::with_seed(99);
        let json = config.to_json().unwrap();
        assert_eq!(WorldConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_sanitize_probabilities_and_persistence() {
        let params = GeneratorParams {
            persistence: f64::NAN,
            tree_chance: 3.0,
            cave_chance: -1.0,
            ..GeneratorParams::default()
        }
        .sanitized();
        assert_eq!(params.persistence, 1.34);
        assert_eq!(params.tree_chance, 1.0);
        assert_eq!(params.cave_chance, 0.0);
    }

    #[test]
    fn test_negative_persistence_clamps_to_zero() {
        let params = GeneratorParams {
            persistence: -0.16,
            ..GeneratorParams::default()
        }
        .sanitized();
        assert_eq!(params.persistence, 0.0);

        let params = GeneratorParams {
            persistence: 0.09,
            ..GeneratorParams::default()
        }
        .sanitized();
        assert_eq!(params.persistence, 0.09);
    }

    #[test]
    fn test_non_positive_scales_fall_back() {
        let params = GeneratorParams {
            terrain_wavelength: 0.0,
            relief_wavelength: f64::INFINITY,
            elevation: -2.0,
            ..GeneratorParams::default()
        }
        .sanitized();
        let defaults = GeneratorParams::default();
        assert_eq!(params.terrain_wavelength, defaults.terrain_wavelength);
        assert_eq!(params.relief_wavelength, defaults.relief_wavelength);
        assert_eq!(params.elevation, defaults.elevation);
    }
}
