//! Constants for the EDI API

// ============================================================================
// ROUTES
// ============================================================================

/// Versioned API prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Body of `GET /api/v1/edi/health`.
pub const SERVICE_HEALTH_MESSAGE: &str = "EDI Processor Service is running";

// ============================================================================
// CORS
// ============================================================================

/// Default CORS max age in seconds (24 hours)
pub const DEFAULT_CORS_MAX_AGE_SECS: u64 = 86400;

// ============================================================================
// SERVER
// ============================================================================

/// Default bind host.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;
