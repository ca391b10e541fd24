//! Ledger entry model
//!
//! A logged food: the raw record plus the serving amount the user ate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{FdcId, FoodRecord, Nutrition};
use crate::nutrition::extract_nutrition;

/// Baseline serving size when the record does not report one
pub const DEFAULT_SERVING_SIZE: f64 = 100.0;
/// Unit assumed when the record does not report one
pub const DEFAULT_SERVING_UNIT: &str = "g";

/// A logged food item with a mutable serving amount
#[derive(Debug, Clone, Serialize)]
pub struct FoodItemEntry {
    pub id: FdcId,
    pub record: FoodRecord,
    original_serving_size: f64,
    pub serving_size_unit: String,
    amount: f64,
    pub added_at: DateTime<Utc>,
}

impl FoodItemEntry {
    /// Build an entry at one full serving
    pub fn from_record(record: FoodRecord) -> Self {
        let original_serving_size = record
            .serving_size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SERVING_SIZE);
        let serving_size_unit = record
            .serving_size_unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_SERVING_UNIT)
            .to_string();

        Self {
            id: record.id,
            record,
            original_serving_size,
            serving_size_unit,
            amount: original_serving_size,
            added_at: Utc::now(),
        }
    }

    pub fn original_serving_size(&self) -> f64 {
        self.original_serving_size
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Callers validate `amount` first; the ledger is the only writer.
    pub(crate) fn set_amount(&mut self, amount: f64) {
        self.amount = amount;
    }

    pub fn scaling_factor(&self) -> f64 {
        self.amount / self.original_serving_size
    }

    /// Nutrient values for one original serving
    pub fn base_nutrition(&self) -> Nutrition {
        extract_nutrition(&self.record.nutrients)
    }

    /// Nutrient values for the current amount
    pub fn scaled_nutrition(&self) -> Nutrition {
        self.base_nutrition().scale(self.scaling_factor())
    }

    pub fn row(&self) -> EntryRow {
        EntryRow {
            id: self.id,
            description: self.record.description.clone(),
            amount: self.amount,
            original_serving_size: self.original_serving_size,
            serving_size_unit: self.serving_size_unit.clone(),
            nutrition: self.scaled_nutrition(),
        }
    }
}

/// Presentation row for one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    pub id: FdcId,
    pub description: String,
    pub amount: f64,
    pub original_serving_size: f64,
    pub serving_size_unit: String,
    pub nutrition: Nutrition,
}
