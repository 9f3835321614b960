//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, injected faults, points calls)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `user_service_requests_total` (counter): requests by method, path, status
//! - `user_service_request_duration_seconds` (histogram): latency distribution
//! - `user_service_faults_injected_total` (counter): synthetic failures
//! - `user_service_points_fetch_total` (counter): points calls by outcome
//!
//! # Design Decisions
//! - Recording without an installed recorder is a no-op, so tests need no setup
//! - Path label uses the matched route template, never the raw path;
//!   requests no route matched share the `unmatched` label

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    metrics::counter!(
        "user_service_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "user_service_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_fault_injected() {
    metrics::counter!("user_service_faults_injected_total").increment(1);
}

/// `outcome` is `ok` or the failure kind.
pub fn record_points_fetch(outcome: &'static str) {
    metrics::counter!("user_service_points_fetch_total", "outcome" => outcome).increment(1);
}

/// Path label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Route template of `request`, or [`UNMATCHED_PATH`].
pub fn path_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Middleware recording request count and latency for every request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = path_label(&request);

    let start = Instant::now();
    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);

    response
}
