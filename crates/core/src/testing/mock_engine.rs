//! Mock engine client for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::engine::{
    Document, EngineClient, EngineError, EngineInfo, JudgeEntry, SearchParams,
};

/// A recorded search call.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The parameters that were submitted.
    pub params: SearchParams,
}

/// A recorded judge call.
#[derive(Debug, Clone)]
pub struct RecordedJudge {
    /// The query that was submitted.
    pub query: String,
    /// The document ids that were submitted, in order.
    pub ids: Vec<String>,
}

/// Mock implementation of the EngineClient trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable documents, judge entries and engine info
/// - Track calls for assertions
/// - Simulate failures and delays
///
/// # Example
///
/// ```rust,ignore
/// use paperino_core::testing::{fixtures, MockEngineClient};
///
/// let engine = MockEngineClient::new();
/// engine.set_documents(vec![
///     fixtures::document("a1", "Attention Is All You Need"),
/// ]).await;
///
/// let docs = engine.search(&SearchParams { query: "attention".into(), ..Default::default() }).await?;
/// assert_eq!(docs.len(), 1);
/// assert_eq!(engine.search_count().await, 1);
/// ```
pub struct MockEngineClient {
    /// Configured engine info.
    info: Arc<RwLock<EngineInfo>>,
    /// Configured search results.
    documents: Arc<RwLock<Vec<Document>>>,
    /// Configured judge entries. `None` echoes the submitted ids as
    /// relevant, one entry per id.
    judge_entries: Arc<RwLock<Option<Vec<JudgeEntry>>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<EngineError>>>,
    /// If set, every call sleeps this long before responding.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Recorded search calls.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// Recorded judge calls.
    judges: Arc<RwLock<Vec<RecordedJudge>>>,
    /// Number of info calls.
    info_calls: Arc<RwLock<usize>>,
}

impl Default for MockEngineClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngineClient {
    /// Create a new mock with no documents configured.
    pub fn new() -> Self {
        Self {
            info: Arc::new(RwLock::new(EngineInfo {
                option: "mock-engine".to_string(),
            })),
            documents: Arc::new(RwLock::new(Vec::new())),
            judge_entries: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            searches: Arc::new(RwLock::new(Vec::new())),
            judges: Arc::new(RwLock::new(Vec::new())),
            info_calls: Arc::new(RwLock::new(0)),
        }
    }

    /// Set the engine option reported by info calls.
    pub async fn set_option(&self, option: &str) {
        self.info.write().await.option = option.to_string();
    }

    /// Set the documents returned by subsequent searches.
    pub async fn set_documents(&self, documents: Vec<Document>) {
        *self.documents.write().await = documents;
    }

    /// Set the entries returned verbatim by subsequent judge calls.
    pub async fn set_judge_entries(&self, entries: Vec<JudgeEntry>) {
        *self.judge_entries.write().await = Some(entries);
    }

    /// Revert to the default judge behavior (echo ids as relevant).
    pub async fn clear_judge_entries(&self) {
        *self.judge_entries.write().await = None;
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: EngineError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every call sleep before responding.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get recorded search calls.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get recorded judge calls.
    pub async fn recorded_judges(&self) -> Vec<RecordedJudge> {
        self.judges.read().await.clone()
    }

    /// Number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Number of judge calls performed.
    pub async fn judge_count(&self) -> usize {
        self.judges.read().await.len()
    }

    /// Number of info calls performed.
    pub async fn info_count(&self) -> usize {
        *self.info_calls.read().await
    }

    async fn simulate_latency(&self) {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn take_error(&self) -> Option<EngineError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl EngineClient for MockEngineClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn info(&self) -> Result<EngineInfo, EngineError> {
        self.simulate_latency().await;
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        *self.info_calls.write().await += 1;
        Ok(self.info.read().await.clone())
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<Document>, EngineError> {
        self.simulate_latency().await;
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.searches.write().await.push(RecordedSearch {
            params: params.clone(),
        });

        Ok(self.documents.read().await.clone())
    }

    async fn judge(&self, query: &str, ids: &[String]) -> Result<Vec<JudgeEntry>, EngineError> {
        self.simulate_latency().await;
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.judges.write().await.push(RecordedJudge {
            query: query.to_string(),
            ids: ids.to_vec(),
        });

        let configured = self.judge_entries.read().await.clone();
        Ok(configured
            .unwrap_or_else(|| ids.iter().map(|id| JudgeEntry::new(id.clone(), true)).collect()))
    }
}
