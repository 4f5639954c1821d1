//! EDI Core - Classification & Response Composition
//!
//! Validates the four classification fields of a mock EDI request, maps them
//! to zero, one or two response artifacts and names those artifacts
//! deterministically. No HTTP types live here; the API crate wraps this.

pub mod composer;
pub mod constants;
pub mod content;
pub mod enums;
pub mod error;
pub mod naming;
pub mod processor;
pub mod request;
pub mod response;
pub mod validation;

pub use composer::{ComposeError, ResponseComposer};
pub use content::{ContentCatalog, ContentError, ContentKey, ContentResolver, EMBEDDED_CATALOG};
pub use enums::{Format, OrderType, ResponseType, TransactionType, UnknownValue};
pub use error::{unattributed_failure, EdiError, EdiResult, MalformedRequest, ProcessingFailure};
pub use processor::{ProcessOutcome, RequestProcessor};
pub use request::{ClassificationFields, EdiRequest, RequestDetails};
pub use response::{EdiResponse, ResponseArtifact};
pub use validation::{
    AsnReply, Classification, FieldValidator, OrderReply, Transaction, ValidationError,
    ValidationOutcome,
};
