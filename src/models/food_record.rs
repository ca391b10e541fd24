//! Food record model
//!
//! A food as returned by a FoodData Central search, decoded straight from the
//! camelCase wire format. Fields this crate does not interpret are kept in
//! `extra` so the detail view can show the full upstream record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// FoodData Central identifier; also the ledger entry key
pub type FdcId = u64;

/// One nutrient value attached to a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientRecord {
    pub nutrient_id: u32,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

impl NutrientRecord {
    pub fn new(nutrient_id: u32, value: f64) -> Self {
        Self {
            nutrient_id,
            value,
            nutrient_name: None,
            unit_name: None,
        }
    }
}

/// A candidate food from the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(rename = "fdcId")]
    pub id: FdcId,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "foodNutrients", default)]
    pub nutrients: Vec<NutrientRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_owner: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FoodRecord {
    /// Minimal record, mostly for tests and hand-built fixtures
    pub fn new(id: FdcId, description: impl Into<String>, nutrients: Vec<NutrientRecord>) -> Self {
        Self {
            id,
            description: description.into(),
            nutrients,
            serving_size: None,
            serving_size_unit: None,
            data_type: None,
            brand_owner: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving_size = Some(size);
        self.serving_size_unit = Some(unit.into());
        self
    }
}
