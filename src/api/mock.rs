use super::Provider;
use crate::models::SearchCandidate;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::info;

/// A scriptable in-memory provider used in tests.
/// Search results are keyed by exact query string;
/// unknown queries return no candidates. Calls are recorded so tests can
/// assert on query order and appended ids.
#[derive(Default)]
pub struct MockProvider {
    results: Mutex<HashMap<String, Vec<SearchCandidate>>>,
    failing_queries: Mutex<HashSet<String>>,
    fail_adds: bool,
    pub search_log: Mutex<Vec<String>>,
    pub added: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every add_tracks call fail, for append-failure tests.
    pub fn with_failing_adds() -> Self {
        Self {
            fail_adds: true,
            ..Self::default()
        }
    }

    /// Script the candidates returned for an exact query string.
    pub fn set_results(&self, query: &str, candidates: Vec<SearchCandidate>) {
        self.results
            .lock()
            .unwrap()
            .insert(query.to_string(), candidates);
    }

    /// Make searches for an exact query string fail.
    pub fn fail_query(&self, query: &str) {
        self.failing_queries
            .lock()
            .unwrap()
            .insert(query.to_string());
    }

    pub fn searches(&self) -> Vec<String> {
        self.search_log.lock().unwrap().clone()
    }

    pub fn added_ids(&self) -> Vec<String> {
        self.added.lock().unwrap().clone()
    }

    fn is_authenticated(&self) -> bool {
        false
    }
    fn name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        MockProvider::name(self)
    }
    fn is_authenticated(&self) -> bool {
        MockProvider::is_authenticated(self)
    }

    async fn create_playlist(&self, name: &str, _description: &str) -> Result<String> {
        info!("MockProvider: create_playlist {}", name);
        Ok(format!("mock-playlist-{}", name))
    }

    async fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<()> {
        if self.fail_adds {
            return Err(anyhow!("mock append failure"));
        }
        info!(
            "MockProvider: add_tracks {} -> {} tracks",
            playlist_id,
            ids.len()
        );
        self.added.lock().unwrap().extend(ids.iter().cloned());
        Ok(())
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        self.search_log.lock().unwrap().push(query.to_string());
        if self.failing_queries.lock().unwrap().contains(query) {
            return Err(anyhow!("mock search failure"));
        }
        Ok(self
            .results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
