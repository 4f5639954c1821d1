//! OpenAPI Specification for the EDI API
//!
//! Generated with utoipa from the wire types and route annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{edi, health};
use crate::telemetry::metrics;

use edi_core::{EdiRequest, EdiResponse, RequestDetails, ResponseArtifact};

/// OpenAPI document for the EDI API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EDI Mock Responder API",
        version = "0.1.0",
        description = "Classifies EDI test requests and answers with deterministic mock X12 and JSON documents",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "EDI", description = "Mock EDI document processing"),
        (name = "Health", description = "Liveness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        edi::process_edi,
        edi::service_health,
        health::ping,
        health::liveness,
        metrics::metrics_handler,
    ),
    components(
        schemas(
            EdiRequest,
            RequestDetails,
            EdiResponse,
            ResponseArtifact,
            ApiError,
            ErrorCode,
            health::HealthResponse,
            health::HealthStatus,
            health::HealthDetails,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Pretty-printed JSON document.
    pub fn to_pretty_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}
