//! Fuzz test for request processing
//!
//! Feeds arbitrary bytes through the JSON envelope and the processor to find
//! panics or outcomes that break the response contract.
//!
//! Run with: cargo +nightly fuzz run process_fuzz -- -max_total_time=60

#![no_main]

use std::sync::{Arc, OnceLock};

use edi_core::{ContentCatalog, EdiRequest, ProcessOutcome, RequestProcessor};
use libfuzzer_sys::fuzz_target;

fn processor() -> &'static RequestProcessor {
    static PROCESSOR: OnceLock<RequestProcessor> = OnceLock::new();
    PROCESSOR.get_or_init(|| {
        let catalog = ContentCatalog::embedded().expect("embedded catalog parses");
        RequestProcessor::new(Arc::new(catalog))
    })
}

fuzz_target!(|data: &[u8]| {
    let request: EdiRequest = match serde_json::from_slice(data) {
        Ok(request) => request,
        Err(_) => return,
    };

    match processor().process(&request) {
        Ok(ProcessOutcome::Composed(response)) | Ok(ProcessOutcome::Rejected(response)) => {
            // Every body carries one or two artifacts.
            assert!(!response.is_empty() && response.len() <= 2);
            let uuid = request.uuid.as_deref().unwrap_or_default();
            for artifact in response.artifacts() {
                assert!(artifact.filename.contains(uuid));
                assert!(!artifact.mime_type.is_empty());
            }
        }
        Ok(ProcessOutcome::Suppressed) => {
            assert!(RequestProcessor::should_suppress(&request));
        }
        Err(error) => {
            let response = error.to_response();
            assert_eq!(response.len(), 1);
            assert!(!response.artifacts()[0].success);
        }
    }
});
