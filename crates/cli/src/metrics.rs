//! Prometheus metrics exposure for the terminal client.
//!
//! The core library records engine traffic metrics; this module owns
//! the registry and renders them on demand for the `stats` command.

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in paperino_core::metrics::all_metrics() {
        registry
            .register(metric)
            .expect("Failed to register core metrics");
    }
    registry
});

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}
