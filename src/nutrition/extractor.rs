//! Nutrient extraction
//!
//! Upstream foods report the same nutrient under different identifiers
//! depending on the data type (energy in particular), so each tracked kind
//! carries an ordered list of candidate identifiers.

use serde::{Deserialize, Serialize};

use crate::models::{NutrientRecord, Nutrition};

/// Energy (kcal)
pub const NUTRIENT_ENERGY_KCAL: u32 = 1008;
/// Energy, Atwater general factors
pub const NUTRIENT_ENERGY_ATWATER_GENERAL: u32 = 2047;
/// Energy, Atwater specific factors
pub const NUTRIENT_ENERGY_ATWATER_SPECIFIC: u32 = 2048;
pub const NUTRIENT_PROTEIN: u32 = 1003;
pub const NUTRIENT_FAT: u32 = 1004;
pub const NUTRIENT_CARBS: u32 = 1005;

/// Nutrient kinds tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientKind {
    Energy,
    Protein,
    Fat,
    Carbs,
}

impl NutrientKind {
    pub const ALL: [NutrientKind; 4] = [
        NutrientKind::Energy,
        NutrientKind::Protein,
        NutrientKind::Fat,
        NutrientKind::Carbs,
    ];

    /// Candidate identifiers, highest priority first
    pub fn candidate_ids(&self) -> &'static [u32] {
        match self {
            NutrientKind::Energy => &[
                NUTRIENT_ENERGY_KCAL,
                NUTRIENT_ENERGY_ATWATER_GENERAL,
                NUTRIENT_ENERGY_ATWATER_SPECIFIC,
            ],
            NutrientKind::Protein => &[NUTRIENT_PROTEIN],
            NutrientKind::Fat => &[NUTRIENT_FAT],
            NutrientKind::Carbs => &[NUTRIENT_CARBS],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKind::Energy => "energy",
            NutrientKind::Protein => "protein",
            NutrientKind::Fat => "fat",
            NutrientKind::Carbs => "carbs",
        }
    }
}

/// Value of the first candidate present in `nutrients`, or 0.0
///
/// Candidate order wins over record order: with `[1008, 2047]` a 1008 record
/// is chosen even when a 2047 record appears earlier in the list.
pub fn extract(nutrients: &[NutrientRecord], candidate_ids: &[u32]) -> f64 {
    candidate_ids
        .iter()
        .find_map(|id| nutrients.iter().find(|n| n.nutrient_id == *id))
        .map(|n| n.value)
        .unwrap_or(0.0)
}

/// Unscaled values of every tracked kind
pub fn extract_nutrition(nutrients: &[NutrientRecord]) -> Nutrition {
    Nutrition {
        energy: extract(nutrients, NutrientKind::Energy.candidate_ids()),
        protein: extract(nutrients, NutrientKind::Protein.candidate_ids()),
        fat: extract(nutrients, NutrientKind::Fat.candidate_ids()),
        carbs: extract(nutrients, NutrientKind::Carbs.candidate_ids()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32, value: f64) -> NutrientRecord {
        NutrientRecord::new(id, value)
    }

    #[test]
    fn test_extract_empty_is_zero() {
        assert_eq!(extract(&[], &[1008, 2047, 2048]), 0.0);
        assert_eq!(extract(&[], &[]), 0.0);
    }

    #[test]
    fn test_first_candidate_wins() {
        let nutrients = vec![n(1008, 50.0), n(2047, 99.0)];
        assert_eq!(extract(&nutrients, &[1008, 2047, 2048]), 50.0);
    }

    #[test]
    fn test_candidate_order_beats_record_order() {
        let nutrients = vec![n(2047, 99.0), n(1008, 50.0)];
        assert_eq!(extract(&nutrients, &[1008, 2047, 2048]), 50.0);
    }

    #[test]
    fn test_falls_back_to_later_candidate() {
        let nutrients = vec![n(1003, 4.0), n(2048, 120.0)];
        assert_eq!(extract(&nutrients, NutrientKind::Energy.candidate_ids()), 120.0);
    }

    #[test]
    fn test_first_occurrence_of_duplicate_id() {
        let nutrients = vec![n(1003, 4.0), n(1003, 8.0)];
        assert_eq!(extract(&nutrients, &[1003]), 4.0);
    }

    #[test]
    fn test_extract_nutrition() {
        let nutrients = vec![n(1008, 300.0), n(1003, 10.0), n(1004, 5.0), n(1005, 40.0)];
        let values = extract_nutrition(&nutrients);
        assert_eq!(values, Nutrition { energy: 300.0, protein: 10.0, fat: 5.0, carbs: 40.0 });
    }

    #[test]
    fn test_missing_kinds_are_zero() {
        let values = extract_nutrition(&[n(1004, 3.5)]);
        assert_eq!(values.energy, 0.0);
        assert_eq!(values.fat, 3.5);
    }
}
