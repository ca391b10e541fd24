//! Nutrition module
//!
//! Nutrient extraction from upstream records and display formatting.

pub mod display;
pub mod extractor;

pub use display::{fixed2, DisplayRow, DisplayTotals};
pub use extractor::{extract, extract_nutrition, NutrientKind};
