//! EDI API - HTTP Layer for the EDI Mock Responder
//!
//! Exposes the `edi-core` engine over axum: the processing endpoint, health
//! probes, Prometheus metrics and the OpenAPI document. Processing outcomes
//! always travel as artifact bodies; [`ApiError`] is reserved for startup and
//! infrastructure failures.

pub mod config;
pub mod constants;
pub mod error;
pub mod extractors;
pub mod macros;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod reply;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::{is_production_environment, ApiConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use extractors::{EdiJson, MalformedBody};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use reply::{EdiReply, ReplyPolicy};
pub use routes::create_api_router;
pub use state::AppState;
