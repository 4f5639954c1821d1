//! EDI Processing Endpoints
//!
//! - `POST /api/v1/edi/process` - classify a request and return mock documents
//! - `GET /api/v1/edi/health` - fixed service banner

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use edi_core::{EdiRequest, RequestProcessor};

use crate::constants::SERVICE_HEALTH_MESSAGE;
use crate::extractors::EdiJson;
use crate::reply::ReplyPolicy;
use crate::state::AppState;
use crate::telemetry::with_metrics;

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/v1/edi/process - Produce mock EDI documents for a request
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/v1/edi/process",
    tag = "EDI",
    request_body = EdiRequest,
    responses(
        (status = 200, description = "Documents composed; also validation and processing failures in legacy status mode", body = edi_core::EdiResponse),
        (status = 204, description = "Timeout simulation: no body"),
        (status = 400, description = "Malformed request or failed field validation", body = edi_core::EdiResponse),
        (status = 500, description = "Unexpected processing failure", body = edi_core::EdiResponse),
    ),
))]
pub async fn process_edi(
    State(processor): State<Arc<RequestProcessor>>,
    State(policy): State<ReplyPolicy>,
    EdiJson(request): EdiJson<EdiRequest>,
) -> Response {
    let transaction_type = transaction_label(&request);
    let result = processor.process(&request);

    let outcome = match &result {
        Ok(outcome) => outcome.outcome(),
        Err(error) => error.outcome(),
    };

    let reply = policy.reply(result);
    with_metrics(|metrics| {
        metrics.record_transaction(&transaction_type, outcome);
        if let Some(response) = reply.response() {
            metrics.record_artifacts(&transaction_type, response.artifacts());
        }
    });

    reply.into_response()
}

/// GET /api/v1/edi/health - Service banner
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/v1/edi/health",
    tag = "EDI",
    responses(
        (status = 200, description = "Service is running", body = String),
    ),
))]
pub async fn service_health() -> &'static str {
    SERVICE_HEALTH_MESSAGE
}

fn transaction_label(request: &EdiRequest) -> String {
    request
        .details
        .as_ref()
        .and_then(|details| details.fields().transaction_type)
        .unwrap_or(edi_core::constants::UNKNOWN_SEGMENT)
        .to_string()
}

// ============================================================================
// ROUTER
// ============================================================================

/// Routes mounted under `/api/v1/edi`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process_edi))
        .route("/health", get(service_health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_core::RequestDetails;

    #[test]
    fn test_transaction_label_trims_and_defaults() {
        let request = EdiRequest::new("u", RequestDetails::new("  asn ", None, None, None));
        assert_eq!(transaction_label(&request), "asn");

        let request = EdiRequest {
            uuid: Some("u".to_string()),
            details: None,
        };
        assert_eq!(transaction_label(&request), "UNKNOWN");
    }

    #[tokio::test]
    async fn test_service_health_banner() {
        assert_eq!(service_health().await, "EDI Processor Service is running");
    }
}
