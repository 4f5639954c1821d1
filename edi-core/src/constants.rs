//! Constants shared by the composition engine.

// ============================================================================
// MIME TYPES
// ============================================================================

/// MIME type of X12 documents
pub const MIME_TYPE_EDI: &str = "application/edi-x12";

/// MIME type of JSON documents
pub const MIME_TYPE_JSON: &str = "application/json";

/// MIME type of everything else, including every failure artifact
pub const MIME_TYPE_TEXT: &str = "plain/text";

/// Extension used when no format was requested
pub const DEFAULT_EXTENSION: &str = "txt";

// ============================================================================
// ARTIFACT MESSAGES
// ============================================================================

pub const SUCCESS_MESSAGE: &str = "File processed successfully";

pub const ERROR_MESSAGE: &str = "unable to process request";

/// Prefix of the message carried by validation-error artifacts
pub const INVALID_VALUE_MESSAGE: &str = "Invalid value provided";

// ============================================================================
// FILENAME SEGMENTS
// ============================================================================

/// Stand-in for a classification segment that was not supplied
pub const UNKNOWN_SEGMENT: &str = "UNKNOWN";

pub const ERROR_MARKER: &str = "ERROR";

pub const VALIDATION_ERROR_MARKER: &str = "VALIDATION_ERROR";

/// Length of the generated identifier used when no uuid is available
pub const OPAQUE_ID_LEN: usize = 8;

// ============================================================================
// CONTENT CATALOG
// ============================================================================

/// Catalog key consulted when a composed key is absent
pub const DEFAULT_CONTENT_KEY: &str = "DEFAULT";

/// Content used when neither the composed key nor `DEFAULT` exist
pub const DEFAULT_CONTENT: &str = "Default response content";

/// Catalog key for the body of simulated error responses
pub const ERROR_CONTENT_KEY: &str = "ERROR";

/// Fallback body of simulated error responses
pub const DEFAULT_ERROR_CONTENT: &str = "Unable to process request";

/// Legacy property-file suffix stripped from catalog keys on load
pub const LEGACY_KEY_SUFFIX: &str = ".content";
