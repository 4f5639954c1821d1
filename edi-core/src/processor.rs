//! Request orchestration.
//!
//! ```text
//! Received -> Validating -> Rejected | Suppressed | Composing -> Composed | Failed
//! ```
//!
//! Structural checks run first, then the timeout simulation is suppressed,
//! then fields are validated and the response composed.

use std::sync::Arc;

use crate::composer::ResponseComposer;
use crate::constants::INVALID_VALUE_MESSAGE;
use crate::content::ContentResolver;
use crate::enums::TransactionType;
use crate::error::{EdiError, EdiResult, MalformedRequest, ProcessingFailure};
use crate::naming::validation_error_filename;
use crate::request::{ClassificationFields, EdiRequest, RequestDetails};
use crate::response::{EdiResponse, ResponseArtifact};
use crate::validation::{FieldValidator, ValidationError};

/// Terminal state of a request that was not malformed and did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Normal path, including simulated error responses.
    Composed(EdiResponse),
    /// A field failed validation; carries the validation-error artifact.
    Rejected(EdiResponse),
    /// Timeout simulation: the caller must send no body at all.
    Suppressed,
}

impl ProcessOutcome {
    /// Outcome label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProcessOutcome::Composed(_) => "composed",
            ProcessOutcome::Rejected(_) => "rejected",
            ProcessOutcome::Suppressed => "suppressed",
        }
    }

    pub fn response(&self) -> Option<&EdiResponse> {
        match self {
            ProcessOutcome::Composed(response) | ProcessOutcome::Rejected(response) => {
                Some(response)
            }
            ProcessOutcome::Suppressed => None,
        }
    }
}

/// Orchestrates validation, suppression and composition.
#[derive(Debug, Clone)]
pub struct RequestProcessor {
    composer: ResponseComposer,
}

impl RequestProcessor {
    pub fn new(content: Arc<dyn ContentResolver>) -> Self {
        Self {
            composer: ResponseComposer::new(content),
        }
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// True for requests that must be answered with no body.
    pub fn should_suppress(request: &EdiRequest) -> bool {
        request
            .details
            .as_ref()
            .and_then(|details| details.fields().transaction_type)
            .is_some_and(|txn| TransactionType::ErrorTimeout.matches(txn))
    }

    /// Process one request.
    ///
    /// Validation failures are `Ok(Rejected)`; only malformed requests and
    /// composition faults are errors.
    pub fn process(&self, request: &EdiRequest) -> EdiResult<ProcessOutcome> {
        let (uuid, details) = structural_check(request)?;
        let fields = details.fields();
        let transaction_type = fields.transaction_type.unwrap_or_default();

        if Self::should_suppress(request) {
            tracing::info!(uuid, transaction_type, "Suppressing response for timeout simulation");
            return Ok(ProcessOutcome::Suppressed);
        }

        let classification = match FieldValidator::classify(&fields) {
            Ok(classification) => classification,
            Err(e) => {
                tracing::warn!(uuid, transaction_type, error = %e, "Request failed validation");
                return Ok(ProcessOutcome::Rejected(validation_response(&fields, uuid, &e)));
            }
        };

        let response = self
            .composer
            .compose(&classification, uuid)
            .map_err(|reason| {
                tracing::error!(uuid, transaction_type, error = %reason, "Failed to compose response");
                EdiError::from(ProcessingFailure {
                    transaction_type: fields.transaction_type.map(str::to_uppercase),
                    response_type: fields.response_type.map(str::to_string),
                    format: fields.format.map(str::to_string),
                    uuid: Some(uuid.to_string()),
                    reason,
                })
            })?;

        tracing::info!(
            uuid,
            transaction_type = %classification.transaction.transaction_type(),
            artifacts = response.len(),
            "Processed request"
        );
        Ok(ProcessOutcome::Composed(response))
    }
}

fn structural_check(request: &EdiRequest) -> Result<(&str, &RequestDetails), MalformedRequest> {
    let uuid = request
        .uuid
        .as_deref()
        .filter(|uuid| !uuid.trim().is_empty())
        .ok_or(MalformedRequest::MissingUuid)?;
    let details = request
        .details
        .as_ref()
        .ok_or(MalformedRequest::MissingDetails)?;
    if details.fields().transaction_type.is_none() {
        return Err(MalformedRequest::MissingTransactionType);
    }
    Ok((uuid, details))
}

fn validation_response(
    fields: &ClassificationFields<'_>,
    uuid: &str,
    error: &ValidationError,
) -> EdiResponse {
    let message = error.to_string();
    EdiResponse::single(ResponseArtifact::failure(
        validation_error_filename(fields.transaction_type, fields.response_type, uuid, fields.format),
        message.clone(),
        format!("{}: {}", INVALID_VALUE_MESSAGE, message),
    ))
}
