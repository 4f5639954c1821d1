//! Filename derivation.
//!
//! Filenames are `<segments joined by '_'>_<uuid>.<ext>`. Validated
//! classification segments are upper-cased; rejected input and the uuid are
//! echoed as received.

use crate::constants::{
    DEFAULT_EXTENSION, ERROR_MARKER, OPAQUE_ID_LEN, UNKNOWN_SEGMENT, VALIDATION_ERROR_MARKER,
};

/// Extension for a requested format.
///
/// `EDI` and `JSON` map to `edi`/`json`, any other value to its lower-cased
/// literal, and an absent format to `txt`.
pub fn file_extension(format: Option<&str>) -> String {
    match format.map(str::trim).filter(|f| !f.is_empty()) {
        None => DEFAULT_EXTENSION.to_string(),
        Some(f) if f.eq_ignore_ascii_case("EDI") => "edi".to_string(),
        Some(f) if f.eq_ignore_ascii_case("JSON") => "json".to_string(),
        Some(f) => f.to_lowercase(),
    }
}

/// Join classification segments, the uuid and the extension.
pub fn artifact_filename(segments: &[&str], uuid: &str, extension: &str) -> String {
    join_filename(
        segments.iter().map(|segment| segment.trim().to_uppercase()),
        uuid,
        extension,
    )
}

fn join_filename<S: AsRef<str>>(
    segments: impl IntoIterator<Item = S>,
    uuid: &str,
    extension: &str,
) -> String {
    let mut name = segments
        .into_iter()
        .map(|segment| segment.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join("_");
    name.push('_');
    name.push_str(uuid);
    name.push('.');
    name.push_str(extension);
    name
}

/// `<transactionType>_<responseType-or-UNKNOWN>_ERROR_<uuid>.<ext>`
pub fn error_filename(
    transaction_type: Option<&str>,
    response_type: Option<&str>,
    uuid: &str,
    format: Option<&str>,
) -> String {
    artifact_filename(
        &[
            transaction_type.unwrap_or(UNKNOWN_SEGMENT),
            response_type.unwrap_or(UNKNOWN_SEGMENT),
            ERROR_MARKER,
        ],
        uuid,
        &file_extension(format),
    )
}

/// `<transactionType-or-UNKNOWN>_<responseType-or-UNKNOWN>_VALIDATION_ERROR_<uuid>.<ext>`
///
/// The fields failed validation, so they are echoed trimmed but otherwise
/// unchanged.
pub fn validation_error_filename(
    transaction_type: Option<&str>,
    response_type: Option<&str>,
    uuid: &str,
    format: Option<&str>,
) -> String {
    join_filename(
        [
            transaction_type.unwrap_or(UNKNOWN_SEGMENT),
            response_type.unwrap_or(UNKNOWN_SEGMENT),
            VALIDATION_ERROR_MARKER,
        ],
        uuid,
        &file_extension(format),
    )
}

/// Short random identifier used in place of a uuid the caller never gave us.
pub fn opaque_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..OPAQUE_ID_LEN].to_string()
}
