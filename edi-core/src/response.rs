//! Outbound response model.

use serde::{Deserialize, Serialize};

use crate::constants::{MIME_TYPE_TEXT, SUCCESS_MESSAGE};

/// One synthesized document descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResponseArtifact {
    pub success: bool,
    pub filename: String,
    pub content: String,
    pub mime_type: String,
    pub message: String,
}

impl ResponseArtifact {
    /// A successfully produced document.
    pub fn success(
        filename: impl Into<String>,
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            content: content.into(),
            mime_type: mime_type.into(),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// A failure descriptor. Failures are always plain text.
    pub fn failure(
        filename: impl Into<String>,
        content: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            filename: filename.into(),
            content: content.into(),
            mime_type: MIME_TYPE_TEXT.to_string(),
            message: message.into(),
        }
    }
}

/// Ordered, non-empty sequence of artifacts.
///
/// For dual-artifact transactions the acknowledgment always comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EdiResponse {
    response: Vec<ResponseArtifact>,
}

impl EdiResponse {
    pub fn single(artifact: ResponseArtifact) -> Self {
        Self {
            response: vec![artifact],
        }
    }

    /// Build from a composed sequence; `None` when the sequence is empty.
    pub fn from_artifacts(artifacts: Vec<ResponseArtifact>) -> Option<Self> {
        if artifacts.is_empty() {
            None
        } else {
            Some(Self { response: artifacts })
        }
    }

    pub fn artifacts(&self) -> &[ResponseArtifact] {
        &self.response
    }

    pub fn len(&self) -> usize {
        self.response.len()
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    /// True when every artifact reports success.
    pub fn is_success(&self) -> bool {
        self.response.iter().all(|artifact| artifact.success)
    }
}
