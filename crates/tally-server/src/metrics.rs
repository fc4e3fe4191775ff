//! Metric handles bound at startup.
//!
//! `AppMetrics::register` is the only place the demo metrics are declared.
//! Route handlers and the instrumentation layer close over the returned
//! handles; nothing looks metrics up by name on the request path.

use tally_core::error::Result;
use tally_core::{Counter, CounterVec, Gauge, Opts, Registry};

/// Label schema of the per-route request counters.
pub const REQUEST_LABELS: [&str; 2] = ["code", "method"];

#[derive(Clone)]
pub struct AppMetrics {
    /// `http_requests_total{code,method}`: root and `/err`.
    pub http_requests: CounterVec,
    /// `http_test_request_total{code,method}`: `/test`.
    pub http_test_requests: CounterVec,
    /// `version{version="v.."}`. The value stays 0; the label carries the version.
    pub version: Gauge,
    /// `test_metric`: bumped by `/test` when `Type: test` is sent.
    pub test_metric: Counter,
}

impl AppMetrics {
    pub fn register(registry: &Registry) -> Result<Self> {
        let http_requests = registry.register_counter_vec(
            Opts::new("http_requests_total", "Count of all HTTP requests"),
            &REQUEST_LABELS,
        )?;
        let http_test_requests = registry.register_counter_vec(
            Opts::new("http_test_request_total", "Count of test HTTP requests"),
            &REQUEST_LABELS,
        )?;
        let version = registry.register_gauge(
            Opts::new("version", "Version information about this binary")
                .const_label("version", version_label()),
        )?;
        let test_metric =
            registry.register_counter(Opts::new("test_metric", "Shows test metric gauge"))?;

        Ok(Self {
            http_requests,
            http_test_requests,
            version,
            test_metric,
        })
    }
}

pub fn version_label() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}
