//! Error kinds of the processing pipeline.
//!
//! Field validation failures are not errors here: they are a normal
//! [`ProcessOutcome::Rejected`](crate::processor::ProcessOutcome) outcome.

use thiserror::Error;

use crate::composer::ComposeError;
use crate::constants::{ERROR_MESSAGE, UNKNOWN_SEGMENT};
use crate::naming::{error_filename, opaque_id};
use crate::response::{EdiResponse, ResponseArtifact};

/// Result type for request processing.
pub type EdiResult<T> = Result<T, EdiError>;

/// Structural precondition violated before any field is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedRequest {
    #[error("Request body could not be parsed")]
    Unparseable,

    #[error("UUID is required")]
    MissingUuid,

    #[error("Request details cannot be null")]
    MissingDetails,

    #[error("Transaction Type is required")]
    MissingTransactionType,
}

impl MalformedRequest {
    /// Generic failure artifact: `UNKNOWN_UNKNOWN_ERROR_<id>.txt`.
    pub fn to_response(&self) -> EdiResponse {
        unattributed_failure(self.to_string())
    }
}

/// An unexpected fault while composing a validated request.
///
/// Keeps the classification fields so the boundary can still name the
/// error artifact after the request.
#[derive(Debug, Error)]
#[error("Processing failed for {}: {reason}", .transaction_type.as_deref().unwrap_or(UNKNOWN_SEGMENT))]
pub struct ProcessingFailure {
    pub transaction_type: Option<String>,
    pub response_type: Option<String>,
    pub format: Option<String>,
    pub uuid: Option<String>,
    #[source]
    pub reason: ComposeError,
}

impl ProcessingFailure {
    /// Failure artifact named after the original request; a generated id
    /// stands in for a missing uuid.
    pub fn to_response(&self) -> EdiResponse {
        let uuid = self.uuid.clone().unwrap_or_else(opaque_id);
        EdiResponse::single(ResponseArtifact::failure(
            error_filename(
                self.transaction_type.as_deref(),
                self.response_type.as_deref(),
                &uuid,
                self.format.as_deref(),
            ),
            ERROR_MESSAGE,
            ERROR_MESSAGE,
        ))
    }
}

/// Failure artifact for faults that cannot be attributed to a request,
/// such as a panic caught at the HTTP boundary.
pub fn unattributed_failure(message: impl Into<String>) -> EdiResponse {
    EdiResponse::single(ResponseArtifact::failure(
        error_filename(None, None, &opaque_id(), None),
        ERROR_MESSAGE,
        message,
    ))
}

/// Processing errors.
#[derive(Debug, Error)]
pub enum EdiError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] MalformedRequest),

    #[error(transparent)]
    Processing(#[from] Box<ProcessingFailure>),
}

impl EdiError {
    /// Outcome label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            EdiError::MalformedRequest(_) => "malformed",
            EdiError::Processing(_) => "failed",
        }
    }

    /// The failure artifact reported to the caller.
    pub fn to_response(&self) -> EdiResponse {
        match self {
            EdiError::MalformedRequest(malformed) => malformed.to_response(),
            EdiError::Processing(failure) => failure.to_response(),
        }
    }
}

impl From<ProcessingFailure> for EdiError {
    fn from(failure: ProcessingFailure) -> Self {
        EdiError::Processing(Box::new(failure))
    }
}
