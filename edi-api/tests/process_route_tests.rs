//! HTTP tests for the EDI routes, driven through the full router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use edi_api::{create_api_router, ApiConfig};
use edi_core::{ContentResolver, EdiResponse, RequestProcessor};
use edi_test_utils::{assertions, embedded_content, fixtures, FailingContent, PanickingContent};
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// HELPERS
// ============================================================================

fn app_with(content: Arc<dyn ContentResolver>, strict_status: bool) -> Router {
    let config = ApiConfig {
        strict_status,
        ..ApiConfig::default()
    };
    let processor = Arc::new(RequestProcessor::new(content));
    match create_api_router(processor, &config) {
        Ok(router) => router,
        Err(e) => panic!("router must build: {}", e),
    }
}

fn app() -> Router {
    app_with(embedded_content(), true)
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/edi/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn post_value(value: &Value) -> Request<Body> {
    post_json(value.to_string())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn send_edi(app: Router, request: Request<Body>) -> (StatusCode, EdiResponse) {
    let (status, body) = send(app, request).await;
    let response: EdiResponse = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("body is not an EDI response ({}): {}", e, String::from_utf8_lossy(&body)));
    (status, response)
}

// ============================================================================
// COMPOSED RESPONSES
// ============================================================================

#[tokio::test]
async fn order_ack_returns_single_x12_document() {
    let body = fixtures::request_body("abc123", "order", Some("ltl"), Some("EDI"), Some("ACK"));
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assertions::assert_filenames(&response, &["ORDER_LTL_ACK_abc123.edi"]);
    let artifact = &response.artifacts()[0];
    assert!(artifact.success);
    assert_eq!(artifact.mime_type, "application/edi-x12");
    assert_eq!(artifact.message, "File processed successfully");
}

#[tokio::test]
async fn asn_receipt_returns_ack_then_receipt() {
    let body = fixtures::request_body("x1", "ASN", None, None, Some("RECEIPT"));
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assertions::assert_filenames(&response, &["ASN_ACK_x1.txt", "ASN_RECEIPT_x1.txt"]);
}

#[tokio::test]
async fn response_uses_camel_case_mime_type() {
    let body = fixtures::request_body("w1", "ITEM", None, Some("JSON"), Some("ACK"));
    let (status, raw) = send(app(), post_value(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_slice(&raw).unwrap();
    let artifact = &value["response"][0];
    assert_eq!(artifact["mimeType"], "application/json");
    assert_eq!(artifact["filename"], "ITEM_ACK_w1.json");
    assert_eq!(artifact["success"], true);
}

#[tokio::test]
async fn field_aliases_are_accepted() {
    let body = json!({
        "uuid": "al1",
        "request": {
            "transactionType": "order",
            "order_type": "parcel",
            "format": "json",
            "RESPONSE_TYPE": "shipconfirm",
            "inputFile": "ignored"
        }
    });
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assertions::assert_filenames(
        &response,
        &["ORDER_PARCEL_ACK_al1.json", "ORDER_PARCEL_SHIPCONFIRM_al1.json"],
    );
}

#[tokio::test]
async fn error_response_simulation_is_ok_with_failure_artifact() {
    let body = fixtures::request_body("e2", "ERRORRESPONSE", None, None, None);
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    let artifact = assertions::assert_single_failure(&response);
    assert_eq!(artifact.filename, "ERRORRESPONSE_UNKNOWN_ERROR_e2.txt");
    assert_eq!(artifact.message, "unable to process request");
}

// ============================================================================
// SUPPRESSION
// ============================================================================

#[tokio::test]
async fn timeout_simulation_has_no_body() {
    let body = fixtures::request_body("e1", "ErrorTimeout", None, Some("bogus"), Some("bogus"));
    let (status, raw) = send(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(raw.is_empty());
}

// ============================================================================
// REJECTIONS AND MALFORMED REQUESTS
// ============================================================================

#[tokio::test]
async fn validation_rejection_is_bad_request_in_strict_mode() {
    let body = fixtures::request_body("z9", "ORDER", None, None, None);
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let artifact = assertions::assert_single_failure(&response);
    assert_eq!(artifact.content, "RESPONSE TYPE is required.");
    assert_eq!(
        artifact.message,
        "Invalid value provided: RESPONSE TYPE is required."
    );
    assert!(artifact.filename.contains("VALIDATION_ERROR_z9"));
}

#[tokio::test]
async fn validation_rejection_is_ok_in_legacy_mode() {
    let body = fixtures::request_body("z9", "PURCHASE", None, None, None);
    let (status, response) = send_edi(app_with(embedded_content(), false), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    let artifact = assertions::assert_single_failure(&response);
    assert!(artifact.content.starts_with("Invalid TRANSACTION TYPE"));
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let (status, response) = send_edi(app(), post_json("{\"UUID\": ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let artifact = assertions::assert_single_failure(&response);
    assert_eq!(artifact.message, "Request body could not be parsed");
    assertions::assert_unattributed_filename(&artifact.filename);
}

#[tokio::test]
async fn missing_details_is_malformed_in_both_modes() {
    for strict in [true, false] {
        let (status, response) = send_edi(
            app_with(embedded_content(), strict),
            post_value(&json!({ "UUID": "m1" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let artifact = assertions::assert_single_failure(&response);
        assert_eq!(artifact.message, "Request details cannot be null");
    }
}

#[tokio::test]
async fn blank_uuid_is_malformed() {
    let body = fixtures::request_body("   ", "ITEM", None, None, None);
    let (status, response) = send_edi(app(), post_value(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        assertions::assert_single_failure(&response).message,
        "UUID is required"
    );
}

// ============================================================================
// FAULTS
// ============================================================================

#[tokio::test]
async fn content_failure_is_server_error_in_strict_mode() {
    let body = fixtures::request_body("f1", "order", Some("LTL"), Some("EDI"), Some("ACK"));
    let (status, response) =
        send_edi(app_with(Arc::new(FailingContent), true), post_value(&body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let artifact = assertions::assert_single_failure(&response);
    assert_eq!(artifact.filename, "ORDER_ACK_ERROR_f1.edi");
    assert_eq!(artifact.content, "unable to process request");
}

#[tokio::test]
async fn content_failure_is_ok_in_legacy_mode() {
    let body = fixtures::request_body("f2", "ITEM", None, None, Some("ACK"));
    let (status, response) =
        send_edi(app_with(Arc::new(FailingContent), false), post_value(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assertions::assert_single_failure(&response);
}

#[tokio::test]
async fn panic_is_caught_at_the_boundary() {
    for strict in [true, false] {
        let body = fixtures::request_body("p1", "ITEM", None, None, Some("ACK"));
        let (status, response) =
            send_edi(app_with(Arc::new(PanickingContent), strict), post_value(&body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let artifact = assertions::assert_single_failure(&response);
        assert_eq!(artifact.message, "unable to process request");
        assertions::assert_unattributed_filename(&artifact.filename);
    }
}

// ============================================================================
// SERVICE ENDPOINTS
// ============================================================================

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn service_health_banner() {
    let (status, body) = send(app(), get("/api/v1/edi/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"EDI Processor Service is running");
}

#[tokio::test]
async fn health_probes_respond() {
    let (status, body) = send(app(), get("/health/ping")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pong");

    let (status, body) = send(app(), get("/health/live")).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "healthy");
    assert!(value["details"]["version"].is_string());
}

#[tokio::test]
async fn metrics_expose_transaction_counters() {
    let body = fixtures::request_body("mx", "ITEM", None, None, Some("ACK"));
    let (status, _) = send(app(), post_value(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app(), get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("edi_transactions_total"));
    assert!(text.contains("edi_http_requests_total"));
}

#[cfg(feature = "openapi")]
#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(app(), get("/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert!(value["paths"]["/api/v1/edi/process"].is_object());
}

#[tokio::test]
async fn cors_preflight_allows_post() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/edi/process")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("*"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(app(), get("/api/v1/edi/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
