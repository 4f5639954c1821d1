//! JSON body extractor that answers rejections with an EDI failure artifact.
//!
//! A body that is not valid JSON, or not shaped like an [`EdiRequest`], is a
//! malformed request: clients still get a `{"response": [...]}` body rather
//! than axum's plain-text rejection.
//!
//! [`EdiRequest`]: edi_core::EdiRequest

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use edi_core::MalformedRequest;
use serde::de::DeserializeOwned;

use crate::telemetry::with_metrics;

/// Extractor for EDI request bodies.
#[derive(Debug, Clone)]
pub struct EdiJson<T>(pub T);

/// Error returned when the body cannot be read as an EDI request.
#[derive(Debug, thiserror::Error)]
#[error("{reason}: {detail}")]
pub struct MalformedBody {
    pub reason: MalformedRequest,
    pub detail: String,
}

impl From<JsonRejection> for MalformedBody {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            reason: MalformedRequest::Unparseable,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for MalformedBody {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected unparseable request body");
        with_metrics(|metrics| metrics.record_transaction("UNKNOWN", "malformed"));

        let response = self.reason.to_response();
        with_metrics(|metrics| metrics.record_artifacts("UNKNOWN", response.artifacts()));
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for EdiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = MalformedBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(EdiJson(value))
    }
}
