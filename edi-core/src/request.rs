//! Inbound request model.
//!
//! Field names follow the legacy wire envelope (`UUID`, `Request`,
//! `TRANSACTION TYPE`, ...) and accept the common case/spacing variants
//! clients send.

use serde::{Deserialize, Serialize};

/// A request for one or more mock documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EdiRequest {
    /// Caller-supplied correlation id, echoed into every filename.
    #[serde(rename = "UUID", alias = "uuid", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Classification of the requested documents.
    #[serde(rename = "Request", alias = "request", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<RequestDetails>,
}

/// The four classification fields plus the (uninterpreted) input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RequestDetails {
    #[serde(
        rename = "TRANSACTION TYPE",
        alias = "TRANSACTION_TYPE",
        alias = "TRANSACTIONTYPE",
        alias = "transactionType",
        alias = "transaction_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<String>,

    #[serde(
        rename = "ORDER TYPE",
        alias = "ORDER_TYPE",
        alias = "ORDERTYPE",
        alias = "orderType",
        alias = "order_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub order_type: Option<String>,

    #[serde(
        rename = "FORMAT",
        alias = "format",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format: Option<String>,

    #[serde(
        rename = "RESPONSE TYPE",
        alias = "RESPONSE_TYPE",
        alias = "RESPONSETYPE",
        alias = "responseType",
        alias = "response_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub response_type: Option<String>,

    /// Carried for compatibility; never interpreted.
    #[serde(
        rename = "Input File",
        alias = "INPUT_FILE",
        alias = "inputFile",
        alias = "InputFile",
        alias = "input_file",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_file: Option<String>,
}

/// Normalized view of the classification fields.
///
/// Every value is trimmed; a value that is empty after trimming is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationFields<'a> {
    pub transaction_type: Option<&'a str>,
    pub order_type: Option<&'a str>,
    pub format: Option<&'a str>,
    pub response_type: Option<&'a str>,
}

impl<'a> ClassificationFields<'a> {
    pub fn new(
        transaction_type: Option<&'a str>,
        order_type: Option<&'a str>,
        format: Option<&'a str>,
        response_type: Option<&'a str>,
    ) -> Self {
        Self {
            transaction_type: normalize(transaction_type),
            order_type: normalize(order_type),
            format: normalize(format),
            response_type: normalize(response_type),
        }
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl RequestDetails {
    pub fn new(
        transaction_type: impl Into<String>,
        order_type: Option<&str>,
        format: Option<&str>,
        response_type: Option<&str>,
    ) -> Self {
        Self {
            transaction_type: Some(transaction_type.into()),
            order_type: order_type.map(str::to_string),
            format: format.map(str::to_string),
            response_type: response_type.map(str::to_string),
            input_file: None,
        }
    }

    /// Trimmed, empty-as-absent view of the classification fields.
    pub fn fields(&self) -> ClassificationFields<'_> {
        ClassificationFields::new(
            self.transaction_type.as_deref(),
            self.order_type.as_deref(),
            self.format.as_deref(),
            self.response_type.as_deref(),
        )
    }
}

impl EdiRequest {
    pub fn new(uuid: impl Into<String>, details: RequestDetails) -> Self {
        Self {
            uuid: Some(uuid.into()),
            details: Some(details),
        }
    }
}
