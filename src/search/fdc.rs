//! FoodData Central search client
//!
//! Thin wrapper over `GET {base_url}/foods/search`. Caching and debouncing
//! live in `SearchSession`; this client only performs the request.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{SearchError, SearchProvider};
use crate::build_info;
use crate::models::FoodRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// api.data.gov gateway header; keeps the key out of request URLs
const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Option<Vec<FoodRecord>>,
}

/// Decode a `/foods/search` body; a missing or null `foods` is an empty result
pub fn parse_search_response(body: &str) -> Result<Vec<FoodRecord>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;
    Ok(response.foods.unwrap_or_default())
}

// reqwest errors embed the request url; strip it before the message leaves the client
fn network_error(e: reqwest::Error) -> SearchError {
    SearchError::Network(e.without_url().to_string())
}

fn status_error(status: u16, body: String) -> SearchError {
    match status {
        429 => SearchError::RateLimited,
        _ => SearchError::Http { status, body },
    }
}

/// HTTP client for the FoodData Central API
pub struct FdcClient {
    base_url: String,
    api_key: RwLock<Option<String>>,
    http_client: reqwest::Client,
}

impl FdcClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: RwLock::new(api_key.filter(|k| !k.trim().is_empty())),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Swap in a new key; applies to the next request
    pub fn set_api_key(&self, key: String) {
        let mut guard = self.api_key.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(key);
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<String> {
        self.api_key.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SearchProvider for FdcClient {
    async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, SearchError> {
        let api_key = self.api_key().ok_or(SearchError::MissingApiKey)?;

        let url = format!("{}/foods/search", self.base_url);
        debug!(query, "Querying FoodData Central");

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::USER_AGENT, build_info::user_agent())
            .query(&[("query", query)])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }

        let foods = parse_search_response(&body)?;
        debug!(query, count = foods.len(), "FoodData Central search complete");
        Ok(foods)
    }
}
