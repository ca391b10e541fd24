//! Display formatting
//!
//! Totals keep full precision; rounding to two decimals only happens here.

use serde::Serialize;

use crate::models::{EntryRow, FdcId, Nutrition};

/// Format a value with exactly two decimals
pub fn fixed2(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    // "-0.00" reads oddly next to real values
    if rounded == "-0.00" {
        "0.00".to_string()
    } else {
        rounded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTotals {
    pub energy: String,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
}

impl From<&Nutrition> for DisplayTotals {
    fn from(n: &Nutrition) -> Self {
        Self {
            energy: fixed2(n.energy),
            protein: fixed2(n.protein),
            fat: fixed2(n.fat),
            carbs: fixed2(n.carbs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub id: FdcId,
    pub description: String,
    pub amount: String,
    pub unit: String,
    pub energy: String,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
}

impl From<&EntryRow> for DisplayRow {
    fn from(row: &EntryRow) -> Self {
        Self {
            id: row.id,
            description: row.description.clone(),
            amount: fixed2(row.amount),
            unit: row.serving_size_unit.to_lowercase(),
            energy: fixed2(row.nutrition.energy),
            protein: fixed2(row.nutrition.protein),
            fat: fixed2(row.nutrition.fat),
            carbs: fixed2(row.nutrition.carbs),
        }
    }
}
