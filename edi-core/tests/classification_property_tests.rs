//! Property-Based Tests for Classification & Composition
//!
//! **Property 1: Table completeness**
//!
//! For any valid (transactionType, orderType, format, responseType) tuple the
//! processor composes exactly the artifacts of the classification table,
//! named deterministically and in ACK-first order.
//!
//! **Property 2: Error simulations**
//!
//! ERRORTIMEOUT never yields a body; ERRORRESPONSE always yields exactly one
//! failure artifact, whatever the other fields hold.
//!
//! **Property 3: Deterministic validation**
//!
//! The first failing check always wins and validation is pure.

use edi_core::{
    EdiError, EdiRequest, FieldValidator, MalformedRequest, ProcessOutcome, RequestDetails,
    RequestProcessor, ValidationOutcome,
};
use edi_test_utils::{assertions, embedded_content, fixtures, generators, EchoContent};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// TEST CONFIGURATION
// ============================================================================

fn test_processor() -> RequestProcessor {
    RequestProcessor::new(embedded_content())
}

fn extension_for(format: Option<&str>) -> &'static str {
    match format {
        Some("EDI") => "edi",
        Some("JSON") => "json",
        _ => "txt",
    }
}

fn composed(outcome: Result<ProcessOutcome, EdiError>) -> Result<edi_core::EdiResponse, TestCaseError> {
    match outcome {
        Ok(ProcessOutcome::Composed(response)) => Ok(response),
        other => Err(TestCaseError::fail(format!("Expected composed outcome, got {:?}", other))),
    }
}

// ============================================================================
// WORKED EXAMPLES
// ============================================================================

#[test]
fn example_order_ltl_edi_ack() {
    let outcome = test_processor().process(&fixtures::order_ack_request("abc123"));
    let Ok(ProcessOutcome::Composed(response)) = outcome else {
        panic!("expected composed outcome, got {:?}", outcome);
    };
    assertions::assert_filenames(&response, &["ORDER_LTL_ACK_abc123.edi"]);
    let artifact = &response.artifacts()[0];
    assert!(artifact.success);
    assert_eq!(artifact.mime_type, "application/edi-x12");
    assert_eq!(artifact.message, "File processed successfully");
    assert!(artifact.content.contains("ST*855"));
}

#[test]
fn example_asn_receipt_without_format() {
    let outcome = test_processor().process(&fixtures::asn_receipt_request("x1"));
    let Ok(ProcessOutcome::Composed(response)) = outcome else {
        panic!("expected composed outcome, got {:?}", outcome);
    };
    assertions::assert_filenames(&response, &["ASN_ACK_x1.txt", "ASN_RECEIPT_x1.txt"]);
    assert!(response.is_success());
    assert!(response.artifacts().iter().all(|a| a.mime_type == "plain/text"));
}

#[test]
fn example_order_without_response_type() {
    let request = EdiRequest::new("z9", RequestDetails::new("ORDER", None, None, None));
    assertions::assert_rejected_with(
        &test_processor().process(&request),
        "RESPONSE TYPE is required.",
    );
}

#[test]
fn example_blank_uuid_is_malformed() {
    let request = EdiRequest::new("", RequestDetails::new("ITEM", None, None, None));
    let err = test_processor().process(&request).unwrap_err();
    assert!(matches!(err, EdiError::MalformedRequest(MalformedRequest::MissingUuid)));
    let response = err.to_response();
    let artifact = assertions::assert_single_failure(&response);
    assert_eq!(artifact.message, "UUID is required");
    assertions::assert_unattributed_filename(&artifact.filename);
}

#[test]
fn example_timeout_has_no_body() {
    assertions::assert_suppressed(&test_processor().process(&fixtures::timeout_request("e1")));
}

#[test]
fn getschema_order_type_refines_content() {
    let request = EdiRequest::new(
        "g1",
        RequestDetails::new("GETSCHEMA", Some("parcel"), Some("EDI"), Some("ORDER")),
    );
    let outcome = test_processor().process(&request);
    let Ok(ProcessOutcome::Composed(response)) = outcome else {
        panic!("expected composed outcome, got {:?}", outcome);
    };
    assertions::assert_filenames(&response, &["GETSCHEMA_ORDER_PARCEL_g1.edi"]);
    assert!(response.artifacts()[0].content.contains("parcel carrier"));
}

#[test]
fn shipconfirm_keys_are_composed_in_order() {
    let processor = RequestProcessor::new(Arc::new(EchoContent::new()));
    let request = EdiRequest::new(
        "k1",
        RequestDetails::new("ORDER", Some("LTL"), Some("JSON"), Some("SHIPCONFIRM")),
    );
    let outcome = processor.process(&request);
    let Ok(ProcessOutcome::Composed(response)) = outcome else {
        panic!("expected composed outcome, got {:?}", outcome);
    };
    let contents: Vec<&str> = response.artifacts().iter().map(|a| a.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "content:ORDER.LTL.SHIPCONFIRM.ACK.JSON",
            "content:ORDER.LTL.SHIPCONFIRM.JSON"
        ]
    );
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Property 1: Table completeness**
    #[test]
    fn prop_valid_cases_compose_expected_artifacts(
        case in generators::arb_valid_case(),
        uuid in generators::arb_uuid(),
    ) {
        let request = EdiRequest::new(uuid.clone(), case.details.clone());
        let response = composed(test_processor().process(&request))?;

        let ext = extension_for(case.details.format.as_deref());
        let expected: Vec<String> = case
            .stems
            .iter()
            .map(|stem| format!("{}_{}.{}", stem, uuid, ext))
            .collect();
        let actual: Vec<String> = response.artifacts().iter().map(|a| a.filename.clone()).collect();

        prop_assert_eq!(actual, expected);
        prop_assert!(response.is_success());
    }

    /// The uuid segment of every filename is the input uuid, untouched.
    #[test]
    fn prop_uuid_round_trips_into_filenames(
        case in generators::arb_valid_case(),
        uuid in generators::arb_uuid(),
    ) {
        let request = EdiRequest::new(uuid.clone(), case.details);
        let response = composed(test_processor().process(&request))?;
        for artifact in response.artifacts() {
            let suffix_start = artifact.filename.rfind('.').unwrap_or(artifact.filename.len());
            let stem = &artifact.filename[..suffix_start];
            prop_assert!(stem.ends_with(&format!("_{}", uuid)), "{} lacks {}", artifact.filename, uuid);
        }
    }

    /// Field values match case-insensitively and ignore padding.
    #[test]
    fn prop_casing_and_padding_do_not_matter(
        txn in generators::arb_case_variant("ORDER"),
        order in generators::arb_case_variant("PARCEL"),
        format in generators::arb_case_variant("JSON"),
        resp in generators::arb_case_variant("SHIPCONFIRM"),
    ) {
        let request = EdiRequest::new(
            "case-1",
            RequestDetails::new(txn, Some(order.as_str()), Some(format.as_str()), Some(resp.as_str())),
        );
        let response = composed(test_processor().process(&request))?;
        let names: Vec<&str> = response.artifacts().iter().map(|a| a.filename.as_str()).collect();
        prop_assert_eq!(
            names,
            vec!["ORDER_PARCEL_ACK_case-1.json", "ORDER_PARCEL_SHIPCONFIRM_case-1.json"]
        );
    }

    /// **Property 2: ERRORTIMEOUT never yields a body**
    #[test]
    fn prop_timeout_always_suppressed(
        txn in generators::arb_case_variant("ERRORTIMEOUT"),
        order in generators::arb_any_field(),
        format in generators::arb_any_field(),
        resp in generators::arb_any_field(),
        uuid in generators::arb_uuid(),
    ) {
        let request = EdiRequest::new(
            uuid,
            RequestDetails::new(txn, order.as_deref(), format.as_deref(), resp.as_deref()),
        );
        let outcome = test_processor().process(&request);
        prop_assert!(matches!(outcome, Ok(ProcessOutcome::Suppressed)), "got {:?}", outcome);
    }

    /// **Property 2: ERRORRESPONSE yields exactly one failure artifact**
    #[test]
    fn prop_error_response_single_failure(
        order in generators::arb_any_field(),
        format in generators::arb_format(),
        resp in generators::arb_any_field(),
        uuid in generators::arb_uuid(),
    ) {
        let request = EdiRequest::new(
            uuid.clone(),
            RequestDetails::new(
                "ERRORRESPONSE",
                order.as_deref(),
                format.map(|f| f.as_str()),
                resp.as_deref(),
            ),
        );
        let response = composed(test_processor().process(&request))?;
        prop_assert_eq!(response.len(), 1);
        let artifact = &response.artifacts()[0];
        prop_assert!(!artifact.success);
        prop_assert!(artifact.filename.starts_with("ERRORRESPONSE_"));
        let marker = format!("_ERROR_{}.", uuid);
        prop_assert!(artifact.filename.contains(&marker), "{} lacks {}", artifact.filename, marker);
        prop_assert_eq!(artifact.mime_type.as_str(), "plain/text");
    }

    /// **Property 3: transaction type is checked before format**
    #[test]
    fn prop_transaction_type_error_wins(
        txn in generators::arb_invalid_token(),
        format in generators::arb_invalid_token(),
        resp in generators::arb_any_field(),
    ) {
        let outcome = FieldValidator::validate(Some(txn.as_str()), None, Some(format.as_str()), resp.as_deref());
        match outcome {
            ValidationOutcome::Invalid(message) => {
                prop_assert!(message.starts_with("Invalid TRANSACTION TYPE"), "{}", message);
            }
            ValidationOutcome::Valid => prop_assert!(false, "invalid tuple accepted"),
        }
    }

    /// Rejected input is echoed into the validation-error filename as sent.
    #[test]
    fn prop_rejected_fields_are_echoed_verbatim(
        txn in generators::arb_invalid_token(),
        lowercase in any::<bool>(),
    ) {
        let sent = if lowercase { txn.to_lowercase() } else { txn };
        let request = EdiRequest::new("v9", RequestDetails::new(format!(" {} ", sent), None, None, Some("ack")));
        let outcome = test_processor().process(&request);
        let Ok(ProcessOutcome::Rejected(response)) = outcome else {
            return Err(TestCaseError::fail(format!("expected rejection, got {:?}", outcome)));
        };
        let expected = format!("{}_ack_VALIDATION_ERROR_v9.txt", sent);
        prop_assert_eq!(response.artifacts()[0].filename.as_str(), expected.as_str());
    }

    /// Absent format is never an error and always renders as plain text.
    #[test]
    fn prop_absent_format_is_plain_text(case in generators::arb_valid_case()) {
        let mut details = case.details;
        details.format = None;
        let response = composed(test_processor().process(&EdiRequest::new("nf", details)))?;
        for artifact in response.artifacts() {
            prop_assert!(artifact.filename.ends_with(".txt"));
            prop_assert_eq!(artifact.mime_type.as_str(), "plain/text");
        }
    }

    /// Validation is pure: the same input always gives the same outcome.
    #[test]
    fn prop_validation_is_deterministic(
        txn in generators::arb_any_field(),
        order in generators::arb_any_field(),
        format in generators::arb_any_field(),
        resp in generators::arb_any_field(),
    ) {
        let first = FieldValidator::validate(txn.as_deref(), order.as_deref(), format.as_deref(), resp.as_deref());
        let second = FieldValidator::validate(txn.as_deref(), order.as_deref(), format.as_deref(), resp.as_deref());
        prop_assert_eq!(first, second);
    }
}
