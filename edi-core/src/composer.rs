//! Response composition.
//!
//! Turns a validated [`Classification`] into the ordered artifact list. The
//! rule set is a closed match over [`Transaction`], so every transaction and
//! reply combination is covered at compile time.

use std::sync::Arc;

use thiserror::Error;

use crate::constants::{
    DEFAULT_ERROR_CONTENT, ERROR_CONTENT_KEY, ERROR_MESSAGE, MIME_TYPE_TEXT,
};
use crate::content::{ContentError, ContentKey, ContentResolver};
use crate::enums::{Format, OrderType, ResponseType, TransactionType};
use crate::naming::{artifact_filename, error_filename, file_extension};
use crate::response::{EdiResponse, ResponseArtifact};
use crate::validation::{AsnReply, Classification, OrderReply, Transaction};

/// Faults while composing a validated request.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Content lookup failed: {0}")]
    Content(#[from] ContentError),

    #[error("Composition produced no artifacts for {transaction_type}")]
    EmptyResponse { transaction_type: TransactionType },
}

/// Builds artifacts for validated requests.
#[derive(Clone)]
pub struct ResponseComposer {
    content: Arc<dyn ContentResolver>,
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer").finish_non_exhaustive()
    }
}

/// Per-request rendering context.
struct Rendering<'a> {
    uuid: &'a str,
    format: Option<Format>,
    extension: String,
    mime_type: &'static str,
}

impl<'a> Rendering<'a> {
    fn new(uuid: &'a str, format: Option<Format>) -> Self {
        Self {
            uuid,
            format,
            extension: file_extension(format.map(|f| f.as_str())),
            mime_type: format.map(|f| f.mime_type()).unwrap_or(MIME_TYPE_TEXT),
        }
    }

    fn filename(&self, segments: &[&str]) -> String {
        artifact_filename(segments, self.uuid, &self.extension)
    }

    fn key<const N: usize>(&self, segments: [&str; N]) -> ContentKey {
        ContentKey::new(segments).with_format(self.format)
    }
}

impl ResponseComposer {
    pub fn new(content: Arc<dyn ContentResolver>) -> Self {
        Self { content }
    }

    /// Compose the artifacts for a validated request.
    ///
    /// Dual-artifact replies always put the acknowledgment first.
    pub fn compose(
        &self,
        classification: &Classification,
        uuid: &str,
    ) -> Result<EdiResponse, ComposeError> {
        let rendering = Rendering::new(uuid, classification.format);
        let transaction = &classification.transaction;

        let artifacts = match transaction {
            Transaction::GetSchema { schema, order_type } => {
                vec![self.schema(&rendering, *schema, order_type.as_deref())?]
            }
            Transaction::Order { order_type, reply } => self.order(&rendering, *order_type, *reply)?,
            Transaction::Asn { reply } => self.asn(&rendering, *reply)?,
            Transaction::Item => {
                let content = self.content.resolve_key(&rendering.key(["ITEM", "ACK"]))?;
                vec![ResponseArtifact::success(
                    rendering.filename(&["ITEM", "ACK"]),
                    content,
                    rendering.mime_type,
                )]
            }
            // Timeouts are suppressed before composition; one that reaches
            // here is answered like an error simulation.
            Transaction::ErrorResponse { response_type }
            | Transaction::ErrorTimeout { response_type } => vec![self.error_artifact(
                &rendering,
                transaction.transaction_type(),
                response_type.as_deref(),
            )?],
        };

        tracing::debug!(
            uuid,
            transaction_type = %transaction.transaction_type(),
            artifacts = artifacts.len(),
            "Composed response"
        );

        EdiResponse::from_artifacts(artifacts).ok_or(ComposeError::EmptyResponse {
            transaction_type: transaction.transaction_type(),
        })
    }

    fn schema(
        &self,
        rendering: &Rendering<'_>,
        schema: ResponseType,
        order_type: Option<&str>,
    ) -> Result<ResponseArtifact, ComposeError> {
        let base = rendering.key(["GETSCHEMA", schema.as_str()]);
        let (filename, content) = match order_type {
            Some(order_type) => (
                rendering.filename(&["GETSCHEMA", schema.as_str(), order_type]),
                self.content.resolve_first(&[
                    rendering.key(["GETSCHEMA", schema.as_str(), order_type]),
                    base,
                ])?,
            ),
            None => (
                rendering.filename(&["GETSCHEMA", schema.as_str()]),
                self.content.resolve_key(&base)?,
            ),
        };
        Ok(ResponseArtifact::success(filename, content, rendering.mime_type))
    }

    fn order(
        &self,
        rendering: &Rendering<'_>,
        order_type: OrderType,
        reply: OrderReply,
    ) -> Result<Vec<ResponseArtifact>, ComposeError> {
        let ot = order_type.as_str();
        let ack_filename = rendering.filename(&["ORDER", ot, "ACK"]);

        match reply {
            OrderReply::Ack => {
                let content = self.content.resolve_key(&rendering.key(["ORDER", ot, "ACK"]))?;
                Ok(vec![ResponseArtifact::success(
                    ack_filename,
                    content,
                    rendering.mime_type,
                )])
            }
            OrderReply::ShipConfirm => {
                let ack = self
                    .content
                    .resolve_key(&rendering.key(["ORDER", ot, "SHIPCONFIRM", "ACK"]))?;
                let confirmation = self
                    .content
                    .resolve_key(&rendering.key(["ORDER", ot, "SHIPCONFIRM"]))?;
                Ok(vec![
                    ResponseArtifact::success(ack_filename, ack, rendering.mime_type),
                    ResponseArtifact::success(
                        rendering.filename(&["ORDER", ot, "SHIPCONFIRM"]),
                        confirmation,
                        rendering.mime_type,
                    ),
                ])
            }
        }
    }

    fn asn(
        &self,
        rendering: &Rendering<'_>,
        reply: AsnReply,
    ) -> Result<Vec<ResponseArtifact>, ComposeError> {
        let ack_filename = rendering.filename(&["ASN", "ACK"]);

        match reply {
            AsnReply::Ack => {
                let content = self.content.resolve_key(&rendering.key(["ASN", "ACK"]))?;
                Ok(vec![ResponseArtifact::success(
                    ack_filename,
                    content,
                    rendering.mime_type,
                )])
            }
            AsnReply::Receipt => {
                let ack = self
                    .content
                    .resolve_key(&rendering.key(["ASN", "RECEIPT", "ACK"]))?;
                let receipt = self.content.resolve_key(&rendering.key(["ASN", "RECEIPT"]))?;
                Ok(vec![
                    ResponseArtifact::success(ack_filename, ack, rendering.mime_type),
                    ResponseArtifact::success(
                        rendering.filename(&["ASN", "RECEIPT"]),
                        receipt,
                        rendering.mime_type,
                    ),
                ])
            }
        }
    }

    fn error_artifact(
        &self,
        rendering: &Rendering<'_>,
        transaction_type: TransactionType,
        response_type: Option<&str>,
    ) -> Result<ResponseArtifact, ComposeError> {
        let content = self
            .content
            .resolve_key_or(&rendering.key([ERROR_CONTENT_KEY]), DEFAULT_ERROR_CONTENT)?;
        Ok(ResponseArtifact::failure(
            error_filename(
                Some(transaction_type.as_str()),
                response_type,
                rendering.uuid,
                rendering.format.map(|f| f.as_str()),
            ),
            content,
            ERROR_MESSAGE,
        ))
    }
}
