//! Route assembly for the EDI API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use edi_core::{constants::ERROR_MESSAGE, unattributed_failure, RequestProcessor};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

use crate::config::{is_production_environment, ApiConfig};
use crate::constants::API_PREFIX;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::telemetry::{metrics_enabled, metrics_handler, observability_middleware, with_metrics};

pub mod edi;
pub mod health;

pub use edi::create_router as edi_router;
pub use health::create_router as health_router;

// ============================================================================
// OPENAPI ENDPOINTS
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// PANIC BOUNDARY
// ============================================================================

/// Turn a panic anywhere below the boundary into a generic failure artifact.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    let response = unattributed_failure(ERROR_MESSAGE);
    with_metrics(|metrics| {
        metrics.record_transaction("UNKNOWN", "panicked");
        metrics.record_artifacts("UNKNOWN", response.artifacts());
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
}

// ============================================================================
// ROUTER
// ============================================================================

/// Build the complete application router.
///
/// `/metrics` is only mounted while metrics collection is enabled. Fails
/// when the configuration is unsafe for a production deployment.
pub fn create_api_router(processor: Arc<RequestProcessor>, api_config: &ApiConfig) -> ApiResult<Router> {
    if is_production_environment() {
        api_config.validate_for_production()?;
    }

    let state = AppState::new(processor, api_config);

    let mut router = Router::new()
        .nest(&format!("{}/edi", API_PREFIX), edi::create_router(state))
        .nest("/health", health::create_router());

    if metrics_enabled() {
        router = router.route("/metrics", get(metrics_handler));
    }

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", get(openapi_json));
    }

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        // SwaggerUi registers its own document route; keep it apart from /openapi.json.
        router = router.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        );
    }

    let cors = build_cors_layer(api_config);

    Ok(router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(observability_middleware))
        .layer(cors))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        // `Any` headers cannot be combined with credentials, so mirror the
        // request headers instead.
        if config.cors_allow_credentials {
            cors.allow_origin(origins)
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        } else {
            cors.allow_origin(origins).allow_headers(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_panic_with_string_payload() {
        let response = handle_panic(Box::new("boom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_handle_panic_with_opaque_payload() {
        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_cors_layer_builds_for_both_modes() {
        let _ = build_cors_layer(&ApiConfig::default());
        let _ = build_cors_layer(&ApiConfig {
            cors_origins: vec!["https://partners.example".to_string()],
            cors_allow_credentials: true,
            ..ApiConfig::default()
        });
    }
}
