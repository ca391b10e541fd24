//! Food Log Library
//!
//! FoodData Central search and a running food log with scaled nutrient
//! totals, served over MCP.

pub mod build_info;
pub mod config;
pub mod keystore;
pub mod ledger;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod search;
pub mod tools;
