//! Prometheus Metrics Definitions
//!
//! Defines the EDI service metrics with their labels and types.
//! Exposes a /metrics endpoint for Prometheus scraping.

use axum::{http::StatusCode, response::IntoResponse};
use once_cell::sync::{Lazy, OnceCell};
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder};

use crate::error::{ApiError, ApiResult};

/// HTTP request latency buckets (seconds)
/// Covers: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s
const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0,
];

/// Global metrics instance - initialized on first use
pub static METRICS: Lazy<ApiResult<EdiMetrics>> = Lazy::new(EdiMetrics::new);

/// Process-wide collection switch, set once at startup.
static METRICS_ENABLED: OnceCell<bool> = OnceCell::new();

/// Turn metrics collection on or off for the lifetime of the process.
///
/// Only the first call takes effect; returns false when the switch was
/// already set.
pub fn set_metrics_enabled(enabled: bool) -> bool {
    METRICS_ENABLED.set(enabled).is_ok()
}

/// Whether metrics are collected and `/metrics` is served. Defaults to on.
pub fn metrics_enabled() -> bool {
    METRICS_ENABLED.get().copied().unwrap_or(true)
}

/// Container for all EDI service metrics.
#[derive(Clone)]
pub struct EdiMetrics {
    /// HTTP request counter - labels: method, path, status
    pub http_requests_total: CounterVec,

    /// HTTP request duration histogram - labels: method, path
    pub http_request_duration_seconds: HistogramVec,

    /// Processed transactions - labels: transaction_type, outcome
    pub transactions_total: CounterVec,

    /// Emitted artifacts - labels: transaction_type, success
    pub artifacts_total: CounterVec,
}

impl EdiMetrics {
    /// Create and register all metrics with Prometheus.
    pub fn new() -> ApiResult<Self> {
        Ok(Self {
            http_requests_total: register_counter_vec!(
                "edi_http_requests_total",
                "Total number of HTTP requests",
                &["method", "path", "status"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register http_requests_total: {}", e)))?,

            http_request_duration_seconds: register_histogram_vec!(
                "edi_http_request_duration_seconds",
                "HTTP request duration in seconds",
                &["method", "path"],
                HTTP_LATENCY_BUCKETS.to_vec()
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register http_request_duration_seconds: {}", e)))?,

            transactions_total: register_counter_vec!(
                "edi_transactions_total",
                "Total number of EDI requests by transaction type and outcome",
                &["transaction_type", "outcome"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register transactions_total: {}", e)))?,

            artifacts_total: register_counter_vec!(
                "edi_artifacts_total",
                "Total number of response artifacts emitted",
                &["transaction_type", "success"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register artifacts_total: {}", e)))?,
        })
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// Record one processed EDI request.
    ///
    /// `transaction_type` is the raw label; anything outside the closed
    /// domain is folded into `other` to keep cardinality bounded.
    pub fn record_transaction(&self, transaction_type: &str, outcome: &str) {
        self.transactions_total
            .with_label_values(&[transaction_label(transaction_type), outcome])
            .inc();
    }

    /// Record emitted artifacts for a transaction type.
    pub fn record_artifacts(&self, transaction_type: &str, artifacts: &[edi_core::ResponseArtifact]) {
        let label = transaction_label(transaction_type);
        for artifact in artifacts {
            let success = if artifact.success { "true" } else { "false" };
            self.artifacts_total.with_label_values(&[label, success]).inc();
        }
    }
}

fn transaction_label(raw: &str) -> &'static str {
    edi_core::TransactionType::parse(raw)
        .map(|t| t.as_str())
        .unwrap_or("other")
}

/// Run `f` against the global metrics, if collection is enabled and they
/// registered.
pub fn with_metrics(f: impl FnOnce(&EdiMetrics)) {
    if !metrics_enabled() {
        return;
    }
    match METRICS.as_ref() {
        Ok(metrics) => f(metrics),
        Err(e) => tracing::debug!(error = %e, "Metrics unavailable"),
    }
}

/// Handler for GET /metrics endpoint.
///
/// Returns Prometheus text format metrics.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/metrics",
    tag = "Observability",
    responses(
        (status = 200, description = "Prometheus metrics in text format", content_type = "text/plain"),
        (status = 500, description = "Failed to encode metrics", body = ApiError),
    ),
))]
pub async fn metrics_handler() -> ApiResult<impl IntoResponse> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    ))
}
