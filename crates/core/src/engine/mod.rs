//! Paper search engine abstraction.
//!
//! This module provides the `EngineClient` trait for talking to the
//! search engine over its HTTP/JSON interface, the data model for
//! search results and judge verdicts, and the reqwest-backed
//! implementation.

mod http;
mod types;

pub use http::{EngineConfig, HttpEngineClient};
pub use types::*;
