//! EDI API Server Entry Point
//!
//! Bootstraps configuration, loads the content catalog and starts the Axum
//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use edi_api::constants::{DEFAULT_BIND_HOST, DEFAULT_PORT};
use edi_api::telemetry::{init_tracer, set_metrics_enabled, TelemetryConfig};
use edi_api::{create_api_router, ApiConfig, ApiError, ApiResult};
use edi_core::{ContentCatalog, RequestProcessor};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracer(&telemetry_config)?;
    set_metrics_enabled(telemetry_config.metrics_enabled);

    let api_config = ApiConfig::from_env();

    let catalog = ContentCatalog::load(api_config.content_path.as_deref())?;
    tracing::info!(
        entries = catalog.len(),
        source = %api_config
            .content_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Content catalog loaded"
    );
    let processor = Arc::new(RequestProcessor::new(Arc::new(catalog)));

    let app: Router = create_api_router(processor, &api_config)?;

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting EDI API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("EDI_API_BIND").unwrap_or_else(|_| DEFAULT_BIND_HOST.to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("EDI_API_PORT").ok())
        .unwrap_or_else(|| DEFAULT_PORT.to_string());
    let port = port_str.parse::<u16>().map_err(|_| {
        ApiError::invalid_input(format!("Invalid port value: {}", port_str))
    })?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>().map_err(|e| {
        ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
    })
}
