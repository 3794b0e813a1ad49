//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sa_submissions_total` (counter): accepted POST submissions
//! - `sa_resolutions_total` (counter): GET polls by outcome label
//!   (`success`, `in_progress`, `timeout`, `malformed`)
//! - `sa_backbone_failures_total` (counter): failed worker submissions
//!   by endpoint

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(err) => tracing::error!(error = %err, "Failed to install Prometheus exporter"),
    }
}

pub fn record_submission() {
    counter!("sa_submissions_total").increment(1);
}

pub fn record_resolution(outcome: &'static str) {
    counter!("sa_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_backbone_failure(endpoint: &'static str) {
    counter!("sa_backbone_failures_total", "endpoint" => endpoint).increment(1);
}
