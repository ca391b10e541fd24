//! Search module
//!
//! FoodData Central lookups behind a debounced, latest-query-wins session.

pub mod fdc;
pub mod provider;
pub mod session;

pub use fdc::{parse_search_response, FdcClient, DEFAULT_BASE_URL};
pub use provider::{SearchError, SearchProvider};
pub use session::{SearchOutcome, SearchSession, SearchSettings};
