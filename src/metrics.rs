//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::Once;

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Session Metrics
    pub static ref SESSION_LOOKUPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_session_lookups_total", "Total number of session lookups"),
        &["result"]
    ).expect("metric can be created");

    // Credential Metrics
    pub static ref SIGN_INS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_sign_ins_total", "Total number of sign-in attempts"),
        &["method", "status"]
    ).expect("metric can be created");
    pub static ref SIGN_UPS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_sign_ups_total", "Total number of accounts created"),
        &["method"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("gatehouse_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

static INIT: Once = Once::new();

/// Initialize metrics registry.
///
/// Safe to call more than once; registration happens on the first call.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(SESSION_LOOKUPS_TOTAL.clone()))
            .expect("SESSION_LOOKUPS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(SIGN_INS_TOTAL.clone()))
            .expect("SIGN_INS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(SIGN_UPS_TOTAL.clone()))
            .expect("SIGN_UPS_TOTAL can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}

/// Record the outcome of a session lookup
pub fn observe_session_lookup(result: &str) {
    SESSION_LOOKUPS_TOTAL.with_label_values(&[result]).inc();
}

/// Record a sign-in attempt
pub fn observe_sign_in(method: &str, status: &str) {
    SIGN_INS_TOTAL.with_label_values(&[method, status]).inc();
}
