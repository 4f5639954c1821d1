//! HTTP rendering of processing outcomes.
//!
//! Every EDI outcome is answered with an artifact body, except the timeout
//! simulation which gets none. [`ReplyPolicy`] decides the status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use edi_core::{EdiError, EdiResponse, ProcessOutcome};

use crate::config::ApiConfig;

/// Status-code policy for outcomes that carry a failure artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPolicy {
    /// Report rejections with 400 and processing failures with 500.
    /// Legacy mode answers both with 200.
    pub strict: bool,
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ReplyPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            strict: config.strict_status,
        }
    }

    pub fn legacy() -> Self {
        Self { strict: false }
    }

    pub fn outcome_status(&self, outcome: &ProcessOutcome) -> StatusCode {
        match outcome {
            ProcessOutcome::Composed(_) => StatusCode::OK,
            ProcessOutcome::Suppressed => StatusCode::NO_CONTENT,
            ProcessOutcome::Rejected(_) if self.strict => StatusCode::BAD_REQUEST,
            ProcessOutcome::Rejected(_) => StatusCode::OK,
        }
    }

    pub fn error_status(&self, error: &EdiError) -> StatusCode {
        match error {
            // Malformed requests are 400 in both modes.
            EdiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            EdiError::Processing(_) if self.strict => StatusCode::INTERNAL_SERVER_ERROR,
            EdiError::Processing(_) => StatusCode::OK,
        }
    }

    /// Render the result of [`edi_core::RequestProcessor::process`].
    pub fn reply(&self, result: Result<ProcessOutcome, EdiError>) -> EdiReply {
        match result {
            Ok(outcome) => {
                let status = self.outcome_status(&outcome);
                match outcome {
                    ProcessOutcome::Composed(response) | ProcessOutcome::Rejected(response) => {
                        EdiReply::Body { status, response }
                    }
                    ProcessOutcome::Suppressed => EdiReply::Empty,
                }
            }
            Err(error) => EdiReply::Body {
                status: self.error_status(&error),
                response: error.to_response(),
            },
        }
    }
}

/// A rendered EDI reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdiReply {
    Body {
        status: StatusCode,
        response: EdiResponse,
    },
    /// 204 with no body at all.
    Empty,
}

impl EdiReply {
    pub fn status(&self) -> StatusCode {
        match self {
            EdiReply::Body { status, .. } => *status,
            EdiReply::Empty => StatusCode::NO_CONTENT,
        }
    }

    pub fn response(&self) -> Option<&EdiResponse> {
        match self {
            EdiReply::Body { response, .. } => Some(response),
            EdiReply::Empty => None,
        }
    }
}

impl IntoResponse for EdiReply {
    fn into_response(self) -> Response {
        match self {
            EdiReply::Body { status, response } => (status, Json(response)).into_response(),
            EdiReply::Empty => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
