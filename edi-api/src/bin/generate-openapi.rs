//! OpenAPI Specification Generator Binary
//!
//! Writes the EDI API OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p edi-api --bin generate-openapi --features openapi > openapi.json

use edi_api::ApiDoc;

fn main() {
    match ApiDoc::to_pretty_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI document: {}", e);
            std::process::exit(1);
        }
    }
}
