//! Types for the paper search engine client.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters for a search request.
///
/// The author list and published period are raw strings forwarded to the
/// engine verbatim; parsing and validation happen server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text query.
    pub query: String,
    /// Optional comma-separated author names ("name1,name2").
    #[serde(default)]
    pub authors: String,
    /// Optional published period ("yyyy-mm-dd,yyyy-mm-dd").
    #[serde(default)]
    pub published: String,
}

/// Relevance verdict for a document, judged against the query that
/// produced it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No evaluation requested yet.
    #[default]
    Unset,
    Relevant,
    NotRelevant,
}

impl From<bool> for Verdict {
    fn from(relevant: bool) -> Self {
        if relevant {
            Verdict::Relevant
        } else {
            Verdict::NotRelevant
        }
    }
}

/// A single search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier, also a de-referenceable link to the paper.
    pub id: String,
    /// Paper title.
    pub title: String,
    /// Authors in display order.
    pub authors: Vec<String>,
    /// Publication date as reported by the engine (YYYY-MM-DD).
    pub published: String,
    /// Abstract, possibly a machine-generated condensation.
    pub summary: String,
    /// Category codes in display order.
    #[serde(rename = "categoryIds", default)]
    pub category_ids: Vec<String>,
    /// Relevance verdict. Never on the wire; set only by a judge merge.
    #[serde(skip)]
    pub judge: Verdict,
}

impl Document {
    /// The published field parsed as a date, if well-formed.
    pub fn published_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.published, "%Y-%m-%d").ok()
    }
}

/// One judge response entry: a single-entry id -> verdict mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct JudgeEntry(pub HashMap<String, bool>);

impl JudgeEntry {
    /// Build an entry for one document id.
    pub fn new(id: impl Into<String>, relevant: bool) -> Self {
        let mut map = HashMap::new();
        map.insert(id.into(), relevant);
        Self(map)
    }

    /// Verdict for the given id, if this entry carries it.
    pub fn verdict_for(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }
}

/// Engine capability/status report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineInfo {
    /// The engine variant label (e.g. "arxiv-sentences-bert-faiss").
    pub option: String,
}

/// Errors that can occur while talking to the engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The engine answered with a non-success status and a detail message.
    #[error("engine error ({status} {status_text}): {message}")]
    Server {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("request timeout")]
    Timeout,

    #[error("engine connection failed: {0}")]
    ConnectionFailed(String),

    /// The engine answered with a success status but an unparseable body.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}

impl EngineError {
    /// The human-readable detail to surface to the user.
    pub fn message(&self) -> &str {
        match self {
            EngineError::Server { message, .. } => message,
            EngineError::Timeout => "request timeout",
            EngineError::ConnectionFailed(cause) => cause,
            EngineError::InvalidResponse(cause) => cause,
        }
    }
}

/// A client for the paper search engine.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &str;

    /// Fetch the engine capability/status report.
    async fn info(&self) -> Result<EngineInfo, EngineError>;

    /// Execute a search, returning documents in rank order.
    async fn search(&self, params: &SearchParams) -> Result<Vec<Document>, EngineError>;

    /// Request relevance verdicts for the given document ids.
    ///
    /// The response carries one entry per submitted id, in submission
    /// order.
    async fn judge(&self, query: &str, ids: &[String]) -> Result<Vec<JudgeEntry>, EngineError>;
}
