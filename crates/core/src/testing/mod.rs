//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the engine client,
//! allowing controller and front-end tests without a running search
//! engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use paperino_core::testing::{fixtures, MockEngineClient};
//!
//! let engine = MockEngineClient::new();
//! engine.set_documents(vec![
//!     fixtures::document("a1", "Attention Is All You Need"),
//! ]).await;
//!
//! // Use as Arc<dyn EngineClient> in a controller...
//! ```

mod mock_engine;

pub use mock_engine::{MockEngineClient, RecordedJudge, RecordedSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::engine::{Document, JudgeEntry, Verdict};

    /// Create a test document with reasonable defaults.
    pub fn document(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Charles Babbage".to_string()],
            published: "2024-05-17".to_string(),
            summary: format!("A study of {}.", title.to_lowercase()),
            category_ids: vec!["cs.IR".to_string(), "cs.CL".to_string()],
            judge: Verdict::Unset,
        }
    }

    /// Create a test document with an arXiv-style dereferenceable id.
    pub fn arxiv_document(number: &str, title: &str) -> Document {
        document(&format!("http://arxiv.org/abs/{}", number), title)
    }

    /// Create a judge entry mapping one id to a verdict.
    pub fn judge_entry(id: &str, relevant: bool) -> JudgeEntry {
        JudgeEntry::new(id, relevant)
    }
}
