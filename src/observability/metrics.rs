//! Metrics collection and exposition.
//!
//! # Metrics
//! - `preroute_actions_total` (counter): decisions by action and status
//! - `preroute_decision_duration_seconds` (histogram): pipeline latency
//! - `preroute_errors_total` (counter): requests the pipeline refused to decide

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::request::Action;

/// Install the Prometheus recorder and its scrape endpoint.
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one decision made by the pipeline.
pub fn record_action(action: &Action, start: Instant) {
    metrics::counter!(
        "preroute_actions_total",
        "action" => action.kind(),
        "status" => action.status().as_u16().to_string()
    )
    .increment(1);

    metrics::histogram!("preroute_decision_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

/// Record a request the pipeline could not decide.
pub fn record_error(reason: &'static str) {
    metrics::counter!("preroute_errors_total", "reason" => reason).increment(1);
}
