//! Search MCP tools
//!
//! Runs searches through the session and remembers the candidates so a later
//! `add_food` call can refer to them by FDC id.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::keystore::ApiKeyStore;
use crate::models::{FdcId, FoodRecord, Nutrition};
use crate::nutrition::extract_nutrition;
use crate::search::{FdcClient, SearchOutcome, SearchProvider, SearchSession};

/// Candidates seen in search results, keyed by FDC id
#[derive(Debug, Default)]
pub struct CandidatePool {
    foods: Mutex<HashMap<FdcId, FoodRecord>>,
}

impl CandidatePool {
    pub fn remember(&self, foods: &[FoodRecord]) {
        let mut pool = self.foods.lock().unwrap_or_else(|e| e.into_inner());
        for food in foods {
            pool.insert(food.id, food.clone());
        }
    }

    pub fn get(&self, id: FdcId) -> Option<FoodRecord> {
        self.foods
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.foods.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary of a candidate food for search results
#[derive(Debug, Serialize)]
pub struct FoodCandidate {
    pub fdc_id: FdcId,
    pub description: String,
    pub brand_owner: Option<String>,
    pub data_type: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_size_unit: Option<String>,
    /// Values per reported serving (per 100 g when none is reported)
    pub nutrition: Nutrition,
}

impl From<&FoodRecord> for FoodCandidate {
    fn from(food: &FoodRecord) -> Self {
        Self {
            fdc_id: food.id,
            description: food.description.clone(),
            brand_owner: food.brand_owner.clone(),
            data_type: food.data_type.clone(),
            serving_size: food.serving_size,
            serving_size_unit: food.serving_size_unit.clone(),
            nutrition: extract_nutrition(&food.nutrients),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub query: String,
    pub status: &'static str,
    pub foods: Vec<FoodCandidate>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub success: bool,
    pub key_path: String,
}

/// Search and remember the candidates
pub async fn search_foods<P: SearchProvider>(
    session: &SearchSession<P>,
    pool: &CandidatePool,
    query: &str,
) -> Result<SearchFoodsResponse, String> {
    let outcome = session
        .search(query)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;

    let (status, foods) = match outcome {
        SearchOutcome::Results(foods) => {
            pool.remember(&foods);
            ("results", foods.iter().map(FoodCandidate::from).collect::<Vec<_>>())
        }
        SearchOutcome::TooShort => ("too_short", Vec::new()),
        SearchOutcome::Superseded => ("superseded", Vec::new()),
    };

    Ok(SearchFoodsResponse {
        query: query.to_string(),
        status,
        total: foods.len(),
        foods,
    })
}

/// Persist a new API key and start using it right away
pub fn set_api_key(store: &ApiKeyStore, client: &FdcClient, key: &str) -> Result<SetApiKeyResponse, String> {
    let key = store.save(key).map_err(|e| e.to_string())?;
    client.set_api_key(key);

    Ok(SetApiKeyResponse {
        success: true,
        key_path: store.path().display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::NutrientRecord;
    use crate::search::{SearchError, SearchSettings};

    struct FixedProvider;

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, SearchError> {
            match query {
                "nothing" => return Ok(Vec::new()),
                "banana" => {
                    return Ok(vec![FoodRecord::new(173944, "Bananas, raw", vec![NutrientRecord::new(1008, 89.0)])])
                }
                _ => {}
            }
            Ok(vec![FoodRecord::new(
                171688,
                "Apples, raw, with skin",
                vec![NutrientRecord::new(1008, 52.0), NutrientRecord::new(1005, 13.81)],
            )
            .with_serving(182.0, "g")])
        }
    }

    fn session() -> SearchSession<FixedProvider> {
        SearchSession::new(FixedProvider, SearchSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_remembers_candidates() {
        let pool = CandidatePool::default();
        let response = search_foods(&session(), &pool, "apple").await.unwrap();

        assert_eq!(response.status, "results");
        assert_eq!(response.total, 1);
        assert_eq!(response.foods[0].nutrition.energy, 52.0);
        assert_eq!(pool.get(171688).map(|f| f.serving_size), Some(Some(182.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_keeps_earlier_searches() {
        let pool = CandidatePool::default();
        let session = session();
        search_foods(&session, &pool, "apple").await.unwrap();
        search_foods(&session, &pool, "banana").await.unwrap();

        assert_eq!(pool.len(), 2);
        assert!(pool.get(171688).is_some());
        assert!(pool.get(173944).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_status() {
        let pool = CandidatePool::default();
        let response = search_foods(&session(), &pool, "ap").await.unwrap();
        assert_eq!(response.status, "too_short");
        assert!(pool.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_results() {
        let pool = CandidatePool::default();
        let response = search_foods(&session(), &pool, "nothing").await.unwrap();
        assert_eq!(response.status, "results");
        assert_eq!(response.total, 0);
    }

    #[test]
    fn test_set_api_key_saves_and_applies() {
        let dir = tempfile::tempdir().unwrap();
        let store = ApiKeyStore::new(dir.path().join("api_key"));
        let client = FdcClient::new("http://127.0.0.1:9", None);

        let response = set_api_key(&store, &client, " KEY ").unwrap();
        assert!(response.success);
        assert!(client.has_api_key());
        assert_eq!(store.load().unwrap(), Some("KEY".to_string()));

        assert!(set_api_key(&store, &client, "").is_err());
    }
}
