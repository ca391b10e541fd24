//! Search provider interface

use async_trait::async_trait;
use thiserror::Error;

use crate::models::FoodRecord;

/// Search error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("API key is not set")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited by FoodData Central, try again later")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode search response: {0}")]
    Decode(String),
}

/// Resolves a text query to candidate foods
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, SearchError>;
}
