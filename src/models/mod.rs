//! Data models
//!
//! Plain structs for search results, ledger entries and nutrient values.

mod entry;
mod food_record;
mod nutrition;

pub use entry::{EntryRow, FoodItemEntry, DEFAULT_SERVING_SIZE, DEFAULT_SERVING_UNIT};
pub use food_record::{FdcId, FoodRecord, NutrientRecord};
pub use nutrition::Nutrition;
