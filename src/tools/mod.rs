//! Food Log tools module
//!
//! MCP tool implementations for the Food Log service.

pub mod ledger;
pub mod search;
pub mod status;
