//! Search controller: owns the query parameters, the document
//! collection and the request phase.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::engine::{Document, EngineClient, SearchParams, Verdict};
use crate::metrics;

use super::types::{ControllerError, RequestPhase};

/// Partial update for search parameters; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct ParamsUpdate {
    pub query: Option<String>,
    pub authors: Option<String>,
    pub published: Option<String>,
}

/// Handle for cancelling a controller's in-flight request from another
/// task.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: broadcast::Sender<()>,
}

impl CancelHandle {
    /// Cancel the in-flight request, if any. A no-op when the
    /// controller is idle.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }
}

/// Drives search and judge requests against the engine.
///
/// At most one request is in flight at a time: the phase guard rejects
/// sequenced double-triggers, and the `&mut self` receivers make an
/// overlapping trigger unrepresentable. A trigger causes exactly one
/// engine call and returns the phase to `Idle` on every path.
pub struct SearchController {
    engine: Arc<dyn EngineClient>,
    params: SearchParams,
    documents: Vec<Document>,
    phase: RequestPhase,
    cancel_tx: broadcast::Sender<()>,
}

impl SearchController {
    /// Create a controller with empty parameters and no documents.
    pub fn new(engine: Arc<dyn EngineClient>) -> Self {
        let (cancel_tx, _) = broadcast::channel(1);

        Self {
            engine,
            params: SearchParams::default(),
            documents: Vec::new(),
            phase: RequestPhase::Idle,
            cancel_tx,
        }
    }

    /// Current search parameters.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Current document collection, in rank order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Current phase.
    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    /// Handle for cancelling an in-flight request.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// Merge the given fields into the search parameters.
    ///
    /// Parameters are read again at trigger time, so updates between
    /// requests always take effect on the next request.
    pub fn update_params(&mut self, update: ParamsUpdate) {
        if let Some(query) = update.query {
            self.params.query = query;
        }
        if let Some(authors) = update.authors {
            self.params.authors = authors;
        }
        if let Some(published) = update.published {
            self.params.published = published;
        }
    }

    fn ensure_idle(&self) -> Result<(), ControllerError> {
        if self.phase != RequestPhase::Idle {
            warn!(phase = %self.phase, "trigger rejected, request already in flight");
            return Err(ControllerError::Busy(self.phase));
        }
        Ok(())
    }

    /// Run a search with the current parameters.
    ///
    /// On success the document collection is replaced wholesale and
    /// every verdict starts `Unset`; on failure it is left untouched.
    /// Returns the number of documents in the new collection.
    pub async fn trigger_search(&mut self) -> Result<usize, ControllerError> {
        self.ensure_idle()?;

        self.phase = RequestPhase::Searching;
        let engine = Arc::clone(&self.engine);
        let params = self.params.clone();
        let mut cancelled = self.cancel_tx.subscribe();

        debug!(query = %params.query, "search triggered");
        let outcome = tokio::select! {
            result = engine.search(&params) => Some(result),
            _ = cancelled.recv() => None,
        };
        self.phase = RequestPhase::Idle;

        match outcome {
            None => {
                info!("search cancelled");
                Err(ControllerError::Cancelled)
            }
            Some(Err(e)) => Err(e.into()),
            Some(Ok(documents)) => {
                info!(count = documents.len(), "search completed");
                self.documents = documents;
                Ok(self.documents.len())
            }
        }
    }

    /// Request relevance verdicts for the current collection and merge
    /// them in by document id.
    ///
    /// An empty collection short-circuits without an engine call. A
    /// response whose entry count differs from the submitted id count
    /// is rejected without merging anything.
    pub async fn trigger_judge(&mut self) -> Result<(), ControllerError> {
        self.ensure_idle()?;

        if self.documents.is_empty() {
            debug!("judge skipped, no documents");
            return Ok(());
        }

        self.phase = RequestPhase::Judging;
        let engine = Arc::clone(&self.engine);
        let query = self.params.query.clone();
        let ids: Vec<String> = self.documents.iter().map(|d| d.id.clone()).collect();
        let mut cancelled = self.cancel_tx.subscribe();

        debug!(ids = ids.len(), "judge triggered");
        let outcome = tokio::select! {
            result = engine.judge(&query, &ids) => Some(result),
            _ = cancelled.recv() => None,
        };
        self.phase = RequestPhase::Idle;

        let entries = match outcome {
            None => {
                info!("judge cancelled");
                return Err(ControllerError::Cancelled);
            }
            Some(result) => result?,
        };

        if entries.len() != ids.len() {
            warn!(
                submitted = ids.len(),
                received = entries.len(),
                "judge response length mismatch"
            );
            return Err(ControllerError::JudgeMismatch {
                submitted: ids.len(),
                received: entries.len(),
            });
        }

        // Key the merge on document ids rather than response position;
        // the wire entries carry the id as their key.
        let mut verdicts: HashMap<String, bool> = HashMap::with_capacity(entries.len());
        for entry in entries {
            verdicts.extend(entry.0);
        }

        let mut applied = 0;
        for doc in &mut self.documents {
            if let Some(&relevant) = verdicts.get(&doc.id) {
                doc.judge = Verdict::from(relevant);
                let label = if relevant { "relevant" } else { "not_relevant" };
                metrics::JUDGE_VERDICTS.with_label_values(&[label]).inc();
                applied += 1;
            }
        }
        info!(applied, "judge verdicts merged");

        Ok(())
    }
}
