//! Biome classification
//!
//! Maps a (relief-scaled) noise sample to one of six terrain types using fixed
//! ascending thresholds.

use serde::{Deserialize, Serialize};

/// Terrain types for chunk cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    #[default]
    DeepWater,
    ShallowWater,
    Sand,
    Grass,
    Mountain,
    Snow,
}

/// Upper bound (inclusive) of each tier, in ascending order. Anything above
/// the last bound is `Snow`.
pub const THRESHOLDS: [(TerrainType, f64); 5] = [
    (TerrainType::DeepWater, -0.7),
    (TerrainType::ShallowWater, -0.3),
    (TerrainType::Sand, 0.2),
    (TerrainType::Grass, 1.5),
    (TerrainType::Mountain, 2.0),
];

/// Classify a sample. Total over `f64`: NaN counts as the lowest tier.
pub fn classify(sample: f64) -> TerrainType {
    THRESHOLDS
        .iter()
        .find(|(_, bound)| sample.is_nan() || sample <= *bound)
        .map(|(terrain, _)| *terrain)
        .unwrap_or(TerrainType::Snow)
}

impl TerrainType {
    pub const ALL: [TerrainType; 6] = [
        TerrainType::DeepWater,
        TerrainType::ShallowWater,
        TerrainType::Sand,
        TerrainType::Grass,
        TerrainType::Mountain,
        TerrainType::Snow,
    ];

    /// Flat ground: the only terrain towns, roads and scatter are placed on.
    pub fn is_flat(&self) -> bool {
        matches!(self, TerrainType::Sand | TerrainType::Grass)
    }

    /// Terrain that blocks movement regardless of objects.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            TerrainType::DeepWater | TerrainType::Mountain | TerrainType::Snow
        )
    }

    pub fn is_water(&self) -> bool {
        matches!(self, TerrainType::DeepWater | TerrainType::ShallowWater)
    }

    /// Get RGB color for rendering
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            TerrainType::DeepWater => (0x36, 0x48, 0xD6),
            TerrainType::ShallowWater => (0x36, 0x7B, 0xD6),
            TerrainType::Sand => (0x96, 0x89, 0x5D),
            TerrainType::Grass => (0x22, 0x99, 0x41),
            TerrainType::Mountain => (0x79, 0x89, 0x8F),
            TerrainType::Snow => (0xD3, 0xE9, 0xF2),
        }
    }

    /// Get ASCII character for terminal display
    pub fn ascii_char(&self) -> char {
        match self {
            TerrainType::DeepWater => '~',
            TerrainType::ShallowWater => '-',
            TerrainType::Sand => ':',
            TerrainType::Grass => '.',
            TerrainType::Mountain => '^',
            TerrainType::Snow => '*',
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TerrainType::DeepWater => "Deep Water",
            TerrainType::ShallowWater => "Shallow Water",
            TerrainType::Sand => "Sand",
            TerrainType::Grass => "Grass",
            TerrainType::Mountain => "Mountain",
            TerrainType::Snow => "Snow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_strictly_ascending() {
        for pair in THRESHOLDS.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
        let tiers: Vec<_> = THRESHOLDS.iter().map(|(t, _)| *t).collect();
        assert_eq!(&tiers[..], &TerrainType::ALL[..5]);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(-0.7), TerrainType::DeepWater);
        assert_eq!(classify(-0.69), TerrainType::ShallowWater);
        assert_eq!(classify(-0.3), TerrainType::ShallowWater);
        assert_eq!(classify(0.0), TerrainType::Sand);
        assert_eq!(classify(0.21), TerrainType::Grass);
        assert_eq!(classify(1.5), TerrainType::Grass);
        assert_eq!(classify(1.75), TerrainType::Mountain);
        assert_eq!(classify(2.0), TerrainType::Mountain);
        assert_eq!(classify(2.01), TerrainType::Snow);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(f64::NEG_INFINITY), TerrainType::DeepWater);
        assert_eq!(classify(f64::INFINITY), TerrainType::Snow);
        assert_eq!(classify(f64::NAN), TerrainType::DeepWater);

        // Sweep: the classification never goes back down as the sample rises
        let mut last = 0;
        for i in -400..=400 {
            let terrain = classify(i as f64 / 100.0);
            let rank = TerrainType::ALL.iter().position(|t| *t == terrain).unwrap();
            assert!(rank >= last);
            last = rank;
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_flat_and_blocking_are_disjoint() {
        for terrain in TerrainType::ALL {
            assert!(!(terrain.is_flat() && terrain.is_blocking()));
        }
        assert!(!TerrainType::ShallowWater.is_blocking());
        assert!(!TerrainType::ShallowWater.is_flat());
    }
}
