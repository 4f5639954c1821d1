//! EDI Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for the classification fields
//! - Content resolvers that fail or panic on demand
//! - Request fixtures for common scenarios
//! - Custom assertions for artifact shapes

pub use edi_core::{
    ContentCatalog, ContentError, ContentResolver, EdiError, EdiRequest, EdiResponse, Format,
    OrderType, ProcessOutcome, RequestDetails, RequestProcessor, ResponseArtifact, ResponseType,
    TransactionType,
};

use std::sync::Arc;

// ============================================================================
// MOCK CONTENT RESOLVERS
// ============================================================================

/// Answers every key with `<prefix><key>` so tests can see which key won.
#[derive(Debug, Clone)]
pub struct EchoContent {
    prefix: String,
}

impl EchoContent {
    pub fn new() -> Self {
        Self {
            prefix: "content:".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for EchoContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentResolver for EchoContent {
    fn lookup(&self, key: &str) -> Result<Option<String>, ContentError> {
        Ok(Some(format!("{}{}", self.prefix, key)))
    }
}

/// A store that is always unavailable.
#[derive(Debug, Clone, Default)]
pub struct FailingContent;

impl ContentResolver for FailingContent {
    fn lookup(&self, key: &str) -> Result<Option<String>, ContentError> {
        Err(ContentError::Unavailable {
            key: key.to_string(),
            reason: "simulated store outage".to_string(),
        })
    }
}

/// A store that panics on lookup, for exercising panic boundaries.
#[derive(Debug, Clone, Default)]
pub struct PanickingContent;

impl ContentResolver for PanickingContent {
    fn lookup(&self, key: &str) -> Result<Option<String>, ContentError> {
        panic!("content store panicked while resolving {}", key)
    }
}

/// The embedded catalog, shared.
pub fn embedded_content() -> Arc<dyn ContentResolver> {
    match ContentCatalog::embedded() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => panic!("embedded catalog must parse: {}", e),
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for the classification fields.

    use super::*;
    use proptest::prelude::*;

    /// A valid request together with the filename stems it must produce.
    #[derive(Debug, Clone)]
    pub struct ValidCase {
        pub details: RequestDetails,
        /// Filenames without the `_<uuid>.<ext>` suffix, in order.
        pub stems: Vec<String>,
    }

    /// Random upper/lower casing of `value`, with optional padding.
    pub fn arb_case_variant(value: &'static str) -> impl Strategy<Value = String> {
        (
            proptest::collection::vec(any::<bool>(), value.len()),
            prop_oneof![Just(""), Just(" "), Just("\t")],
            prop_oneof![Just(""), Just(" "), Just("  ")],
        )
            .prop_map(move |(flips, lead, trail)| {
                let body: String = value
                    .chars()
                    .zip(flips)
                    .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
                    .collect();
                format!("{}{}{}", lead, body, trail)
            })
    }

    /// Opaque caller correlation id: never blank, any casing.
    pub fn arb_uuid() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9-]{0,35}"
    }

    pub fn arb_transaction_type() -> impl Strategy<Value = TransactionType> {
        proptest::sample::select(TransactionType::ALL)
    }

    pub fn arb_order_type() -> impl Strategy<Value = OrderType> {
        proptest::sample::select(OrderType::ALL)
    }

    pub fn arb_format() -> impl Strategy<Value = Option<Format>> {
        proptest::option::of(proptest::sample::select(Format::ALL))
    }

    pub fn arb_response_type() -> impl Strategy<Value = ResponseType> {
        proptest::sample::select(ResponseType::ALL)
    }

    /// A token that is not a member of any classification domain.
    pub fn arb_invalid_token() -> impl Strategy<Value = String> {
        "[A-Z]{2,10}".prop_filter("must not name a domain member", |token| {
            TransactionType::parse(token).is_err()
                && OrderType::parse(token).is_err()
                && Format::parse(token).is_err()
                && ResponseType::parse(token).is_err()
        })
    }

    /// Any value for an optional field, valid or not.
    pub fn arb_any_field() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(prop_oneof![
            arb_invalid_token(),
            proptest::sample::select(ResponseType::ALL).prop_map(|r| r.as_str().to_string()),
            proptest::sample::select(OrderType::ALL).prop_map(|o| o.as_str().to_string()),
            Just("   ".to_string()),
        ])
    }

    /// Every valid non-error combination of the classification table.
    pub fn arb_valid_case() -> impl Strategy<Value = ValidCase> {
        let format = arb_format().prop_map(|f| f.map(|f| f.as_str().to_string()));

        let schema = (
            proptest::sample::select(TransactionType::GetSchema.allowed_response_types()),
            proptest::option::of(arb_order_type()),
        )
            .prop_map(|(resp, order)| {
                let mut stem = format!("GETSCHEMA_{}", resp.as_str());
                if let Some(order) = order {
                    stem.push('_');
                    stem.push_str(order.as_str());
                }
                (
                    "GETSCHEMA",
                    order.map(|o| o.as_str()),
                    resp.as_str(),
                    vec![stem],
                )
            });

        let order = (arb_order_type(), any::<bool>()).prop_map(|(order, ship)| {
            let ot = order.as_str();
            if ship {
                (
                    "ORDER",
                    Some(ot),
                    "SHIPCONFIRM",
                    vec![format!("ORDER_{}_ACK", ot), format!("ORDER_{}_SHIPCONFIRM", ot)],
                )
            } else {
                ("ORDER", Some(ot), "ACK", vec![format!("ORDER_{}_ACK", ot)])
            }
        });

        let asn = any::<bool>().prop_map(|receipt| {
            if receipt {
                (
                    "ASN",
                    None::<&'static str>,
                    "RECEIPT",
                    vec!["ASN_ACK".to_string(), "ASN_RECEIPT".to_string()],
                )
            } else {
                ("ASN", None::<&'static str>, "ACK", vec!["ASN_ACK".to_string()])
            }
        });

        let item = Just(("ITEM", None::<&'static str>, "ACK", vec!["ITEM_ACK".to_string()]));

        (prop_oneof![schema, order, asn, item], format).prop_map(
            |((txn, order, resp, stems), format)| ValidCase {
                details: RequestDetails::new(txn, order, format.as_deref(), Some(resp)),
                stems,
            },
        )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built requests and processors.

    use super::*;
    use serde_json::{json, Value};

    pub fn processor() -> RequestProcessor {
        RequestProcessor::new(embedded_content())
    }

    pub fn order_ack_request(uuid: &str) -> EdiRequest {
        EdiRequest::new(
            uuid,
            RequestDetails::new("ORDER", Some("LTL"), Some("EDI"), Some("ACK")),
        )
    }

    pub fn asn_receipt_request(uuid: &str) -> EdiRequest {
        EdiRequest::new(uuid, RequestDetails::new("ASN", None, None, Some("RECEIPT")))
    }

    pub fn timeout_request(uuid: &str) -> EdiRequest {
        EdiRequest::new(uuid, RequestDetails::new("ERRORTIMEOUT", None, None, None))
    }

    pub fn error_response_request(uuid: &str) -> EdiRequest {
        EdiRequest::new(uuid, RequestDetails::new("ERRORRESPONSE", None, None, None))
    }

    /// Wire body with canonical field names; `None` fields are omitted.
    pub fn request_body(
        uuid: &str,
        transaction_type: &str,
        order_type: Option<&str>,
        format: Option<&str>,
        response_type: Option<&str>,
    ) -> Value {
        let mut details = serde_json::Map::new();
        details.insert("TRANSACTION TYPE".to_string(), json!(transaction_type));
        if let Some(order_type) = order_type {
            details.insert("ORDER TYPE".to_string(), json!(order_type));
        }
        if let Some(format) = format {
            details.insert("FORMAT".to_string(), json!(format));
        }
        if let Some(response_type) = response_type {
            details.insert("RESPONSE TYPE".to_string(), json!(response_type));
        }
        json!({ "UUID": uuid, "Request": Value::Object(details) })
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for artifact shapes.

    use super::*;

    /// Assert the artifact filenames, in order.
    #[track_caller]
    pub fn assert_filenames(response: &EdiResponse, expected: &[&str]) {
        let actual: Vec<&str> = response
            .artifacts()
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(actual, expected, "unexpected artifact filenames");
    }

    /// Assert a single `success=false` artifact.
    #[track_caller]
    pub fn assert_single_failure(response: &EdiResponse) -> &ResponseArtifact {
        assert_eq!(response.len(), 1, "expected exactly one artifact: {:?}", response);
        let artifact = &response.artifacts()[0];
        assert!(!artifact.success, "expected a failure artifact: {:?}", artifact);
        assert_eq!(artifact.mime_type, "plain/text");
        artifact
    }

    /// Assert `UNKNOWN_UNKNOWN_ERROR_<8 hex>.txt`.
    #[track_caller]
    pub fn assert_unattributed_filename(filename: &str) {
        let id = filename
            .strip_prefix("UNKNOWN_UNKNOWN_ERROR_")
            .and_then(|rest| rest.strip_suffix(".txt"));
        match id {
            Some(id) => {
                assert_eq!(id.len(), 8, "generated id in {}", filename);
                assert!(id.chars().all(|c| c.is_ascii_hexdigit()), "generated id in {}", filename);
            }
            None => panic!("Expected UNKNOWN_UNKNOWN_ERROR_<id>.txt, got: {}", filename),
        }
    }

    /// Assert a validation rejection carrying `message`.
    #[track_caller]
    pub fn assert_rejected_with(outcome: &Result<ProcessOutcome, EdiError>, message: &str) {
        match outcome {
            Ok(ProcessOutcome::Rejected(response)) => {
                let artifact = assert_single_failure(response);
                assert_eq!(artifact.content, message);
                assert_eq!(artifact.message, format!("Invalid value provided: {}", message));
                assert!(artifact.filename.contains("_VALIDATION_ERROR_"));
            }
            other => panic!("Expected validation rejection, got: {:?}", other),
        }
    }

    /// Assert a suppressed outcome.
    #[track_caller]
    pub fn assert_suppressed(outcome: &Result<ProcessOutcome, EdiError>) {
        assert!(
            matches!(outcome, Ok(ProcessOutcome::Suppressed)),
            "Expected suppression, got: {:?}",
            outcome
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
