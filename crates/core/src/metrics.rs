//! Prometheus metrics for engine traffic.
//!
//! This module provides metrics for:
//! - Outbound engine requests (counts, durations)
//! - Search result sizes
//! - Judge verdicts applied

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Engine requests total by endpoint and result.
pub static ENGINE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("paperino_engine_requests_total", "Total engine requests"),
        &["endpoint", "result"], // endpoint: "/info"|"/search"|"/judge"; result: "ok"|"error"
    )
    .unwrap()
});

/// Engine request duration in seconds.
pub static ENGINE_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "paperino_engine_request_duration_seconds",
            "Duration of engine requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

/// Documents returned per search.
pub static DOCUMENTS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "paperino_documents_returned",
            "Number of documents returned per search",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
        &[],
    )
    .unwrap()
});

/// Judge verdicts applied by value.
pub static JUDGE_VERDICTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("paperino_judge_verdicts_total", "Total judge verdicts applied"),
        &["verdict"], // "relevant", "not_relevant"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ENGINE_REQUESTS.clone()),
        Box::new(ENGINE_REQUEST_DURATION.clone()),
        Box::new(DOCUMENTS_RETURNED.clone()),
        Box::new(JUDGE_VERDICTS.clone()),
    ]
}
