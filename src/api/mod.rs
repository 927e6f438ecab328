//! API layer
//!
//! HTTP handlers for:
//! - Metrics (Prometheus)

pub mod metrics;

pub use metrics::metrics_router;
