//! Fuzz test for content catalog loading
//!
//! Arbitrary TOML must either load or fail with a `ContentError`, never
//! panic, and a loaded catalog must answer every key.
//!
//! Run with: cargo +nightly fuzz run catalog_fuzz -- -max_total_time=60

#![no_main]

use edi_core::{ContentCatalog, ContentResolver};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        if let Ok(catalog) = ContentCatalog::from_toml_str(source) {
            let content = catalog.resolve("ORDER.LTL.ACK");
            if !catalog.contains_key("ORDER.LTL.ACK") && !catalog.contains_key("DEFAULT") {
                assert_eq!(content, edi_core::constants::DEFAULT_CONTENT);
            }
        }
    }
});
