//! API Configuration Module
//!
//! CORS, status-code policy and content catalog location. Configuration is
//! loaded from environment variables with defaults suited to development.

use std::path::PathBuf;

use crate::constants::DEFAULT_CORS_MAX_AGE_SECS;
use crate::error::{ApiError, ApiResult};

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "http://localhost:3000,https://partners.example.com"
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Processing Configuration
    // ========================================================================
    /// Report rejections and processing failures with 4xx/5xx statuses.
    ///
    /// When false, both are answered with 200 and a `success=false` artifact,
    /// as legacy clients expect.
    pub strict_status: bool,

    /// TOML content catalog to load instead of the embedded one.
    pub content_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(), // Empty = allow all
            cors_allow_credentials: false,
            cors_max_age_secs: DEFAULT_CORS_MAX_AGE_SECS,
            strict_status: true,
            content_path: None,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `EDI_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `EDI_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `EDI_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `EDI_STRICT_STATUS`: "true" or "false" (default: true)
    /// - `EDI_CONTENT_PATH`: Path to a TOML content catalog (default: embedded)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("EDI_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("EDI_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = std::env::var("EDI_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CORS_MAX_AGE_SECS);

        let strict_status = std::env::var("EDI_STRICT_STATUS")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);

        let content_path = std::env::var("EDI_CONTENT_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
            strict_status,
            content_path,
        }
    }

    /// Reject settings that are unsafe outside development.
    pub fn validate_for_production(&self) -> ApiResult<()> {
        if self.cors_origins.is_empty() && self.cors_allow_credentials {
            return Err(ApiError::configuration(
                "CORS credentials require explicit origins in production. Set EDI_CORS_ORIGINS.",
            ));
        }
        if self.cors_origins.is_empty() {
            tracing::warn!("CORS allows any origin in production; set EDI_CORS_ORIGINS to restrict it");
        }
        if !self.strict_status {
            tracing::info!("Legacy status mode: rejections and failures are answered with 200");
        }
        Ok(())
    }
}

/// Check if running in a production environment.
pub fn is_production_environment() -> bool {
    std::env::var("EDI_ENVIRONMENT")
        .map(|e| matches!(e.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}
