//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootstrap_probe_requests_total` (counter): probe answers by probe, status
//!   (`info` answers are counted with status `ok`)
//! - `bootstrap_report_entries` (gauge): set entries per report category
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder the calls are no-ops
//! - The Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const PROBE_REQUESTS: &str = "bootstrap_probe_requests_total";
pub const REPORT_ENTRIES: &str = "bootstrap_report_entries";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(probe: &'static str, status: &'static str) {
    metrics::counter!(PROBE_REQUESTS, "probe" => probe, "status" => status).increment(1);
}

pub fn record_report_entries(category: &str, set_entries: usize) {
    metrics::gauge!(REPORT_ENTRIES, "category" => category.to_string()).set(set_entries as f64);
}
