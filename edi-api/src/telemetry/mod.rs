//! Observability for the EDI API.
//!
//! - Structured logging via `tracing-subscriber`
//! - Prometheus metrics
//! - Request instrumentation middleware

pub mod metrics;
pub mod middleware;
pub mod tracer;

pub use metrics::{
    metrics_enabled, metrics_handler, set_metrics_enabled, with_metrics, EdiMetrics, METRICS,
};
pub use middleware::observability_middleware;
pub use tracer::{init_tracer, LogFormat, TelemetryConfig, DEFAULT_LOG_FILTER};
