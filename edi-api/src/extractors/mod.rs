//! Custom extractors.

pub mod edi_json;

pub use edi_json::{EdiJson, MalformedBody};
