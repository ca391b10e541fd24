//! Search session
//!
//! Typing produces a burst of queries; only the latest one matters. Every
//! call takes a ticket from a monotonic counter, waits out the debounce
//! interval, and gives up as `Superseded` once a newer ticket exists, both
//! before the request and after it returns. Responses are cached per query
//! so revisiting a query does not hit the network again.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::provider::{SearchError, SearchProvider};
use crate::models::FoodRecord;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

/// Result of one search call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "foods", rename_all = "snake_case")]
pub enum SearchOutcome {
    Results(Vec<FoodRecord>),
    /// Query shorter than the configured minimum; nothing was fetched
    TooShort,
    /// A newer query arrived; this result must not be shown
    Superseded,
}

pub struct SearchSession<P> {
    provider: P,
    settings: SearchSettings,
    generation: AtomicU64,
    cache: RwLock<HashMap<String, Vec<FoodRecord>>>,
}

impl<P: SearchProvider> SearchSession<P> {
    pub fn new(provider: P, settings: SearchSettings) -> Self {
        Self {
            provider,
            settings,
            generation: AtomicU64::new(0),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.settings.debounce).await;
        if !self.is_current(ticket) {
            debug!(query, ticket, "Search superseded during debounce");
            return Ok(SearchOutcome::Superseded);
        }

        let query = query.trim();
        if query.chars().count() < self.settings.min_query_len {
            return Ok(SearchOutcome::TooShort);
        }

        if let Some(foods) = self.cache.read().await.get(query) {
            debug!(query, count = foods.len(), "Search served from cache");
            return Ok(SearchOutcome::Results(foods.clone()));
        }

        let result = self.provider.search(query).await;

        if let Ok(foods) = &result {
            self.cache.write().await.insert(query.to_string(), foods.clone());
        }

        if !self.is_current(ticket) {
            debug!(query, ticket, "Discarding stale search response");
            return Ok(SearchOutcome::Superseded);
        }

        result.map(SearchOutcome::Results)
    }

    pub async fn cached_queries(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct MockProvider {
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<String>>,
        failures: AtomicUsize,
    }

    impl MockProvider {
        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }

        fn failing(self, times: usize) -> Self {
            self.failures.store(times, Ordering::SeqCst);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchProvider for MockProvider {
        async fn search(&self, query: &str) -> Result<Vec<FoodRecord>, SearchError> {
            self.calls.lock().unwrap().push(query.to_string());
            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(SearchError::RateLimited);
            }
            Ok(vec![FoodRecord::new(query.len() as u64, query, vec![])])
        }
    }

    fn session(provider: MockProvider) -> SearchSession<MockProvider> {
        SearchSession::new(provider, SearchSettings::default())
    }

    fn descriptions(outcome: &SearchOutcome) -> Vec<String> {
        match outcome {
            SearchOutcome::Results(foods) => foods.iter().map(|f| f.description.clone()).collect(),
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_skips_provider() {
        let s = session(MockProvider::default());
        assert_eq!(s.search("ap").await.unwrap(), SearchOutcome::TooShort);
        assert_eq!(s.search("  ap  ").await.unwrap(), SearchOutcome::TooShort);
        assert!(s.provider().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_query_served_from_cache() {
        let s = session(MockProvider::default());
        let first = s.search("apple").await.unwrap();
        let second = s.search("apple").await.unwrap();

        assert_eq!(descriptions(&first), vec!["apple"]);
        assert_eq!(first, second);
        assert_eq!(s.provider().calls(), vec!["apple"]);
        assert_eq!(s.cached_queries().await, 1);

        s.clear_cache().await;
        s.search("apple").await.unwrap();
        assert_eq!(s.provider().calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_debounce_only_fetch_latest() {
        let s = session(MockProvider::default());

        let (first, second) = tokio::join!(s.search("app"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            s.search("apple").await
        });

        assert_eq!(first.unwrap(), SearchOutcome::Superseded);
        assert_eq!(descriptions(&second.unwrap()), vec!["apple"]);
        assert_eq!(s.provider().calls(), vec!["apple"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_in_flight_response_is_discarded() {
        let provider = MockProvider::default().with_delay("slow query", Duration::from_secs(1));
        let s = session(provider);

        let (stale, fresh) = tokio::join!(s.search("slow query"), async {
            tokio::time::sleep(Duration::from_millis(400)).await;
            s.search("fast").await
        });

        assert_eq!(stale.unwrap(), SearchOutcome::Superseded);
        assert_eq!(descriptions(&fresh.unwrap()), vec!["fast"]);
        assert_eq!(s.provider().calls(), vec!["slow query", "fast"]);
        // the stale response is still worth caching
        assert_eq!(s.cached_queries().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_error_propagates_and_is_not_cached() {
        let s = session(MockProvider::default().failing(1));
        assert_eq!(s.search("banana").await, Err(SearchError::RateLimited));
        assert_eq!(s.cached_queries().await, 0);

        let retry = s.search("banana").await.unwrap();
        assert_eq!(descriptions(&retry), vec!["banana"]);
    }
}
