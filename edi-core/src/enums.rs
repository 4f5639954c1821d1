//! Enumerated classification domains.
//!
//! Input matching is case-insensitive (after trimming); every value renders
//! in its canonical upper-case spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when a string is not a member of a classification domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {domain}: '{value}'")]
pub struct UnknownValue {
    pub domain: &'static str,
    pub value: String,
}

/// Generates the string conversions shared by every classification enum.
macro_rules! classification_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $domain:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Human-readable domain name used in validation messages.
            pub const DOMAIN: &'static str = $domain;

            /// Canonical upper-case spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Case-insensitive parse of a trimmed value.
            pub fn parse(value: &str) -> Result<Self, UnknownValue> {
                let trimmed = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownValue {
                        domain: $domain,
                        value: value.to_string(),
                    })
            }

            /// Check whether `value` names this member, ignoring case and padding.
            pub fn matches(&self, value: &str) -> bool {
                self.as_str().eq_ignore_ascii_case(value.trim())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

classification_enum! {
    /// Top-level business intent of a request.
    TransactionType, "TRANSACTION TYPE" {
        GetSchema => "GETSCHEMA",
        Order => "ORDER",
        Asn => "ASN",
        Item => "ITEM",
        /// Always answered with a single failure artifact.
        ErrorResponse => "ERRORRESPONSE",
        /// Never answered at all.
        ErrorTimeout => "ERRORTIMEOUT",
    }
}

classification_enum! {
    /// Shipping mode of an order.
    OrderType, "ORDER TYPE" {
        Ltl => "LTL",
        Parcel => "PARCEL",
    }
}

classification_enum! {
    /// Rendering of the produced documents.
    Format, "FORMAT" {
        Edi => "EDI",
        Json => "JSON",
    }
}

classification_enum! {
    /// Which document(s) a transaction should answer with.
    ResponseType, "RESPONSE TYPE" {
        Ack => "ACK",
        Asn => "ASN",
        Item => "ITEM",
        Order => "ORDER",
        ShipConfirm => "SHIPCONFIRM",
        Receipt => "RECEIPT",
    }
}

impl TransactionType {
    /// Response types a transaction accepts.
    ///
    /// Error transactions return an empty slice: their response type is
    /// never checked.
    pub fn allowed_response_types(&self) -> &'static [ResponseType] {
        match self {
            TransactionType::GetSchema => &[
                ResponseType::Asn,
                ResponseType::Item,
                ResponseType::Order,
                ResponseType::ShipConfirm,
                ResponseType::Receipt,
            ],
            TransactionType::Order => &[ResponseType::Ack, ResponseType::ShipConfirm],
            TransactionType::Asn => &[ResponseType::Ack, ResponseType::Receipt],
            TransactionType::Item => &[ResponseType::Ack],
            TransactionType::ErrorResponse | TransactionType::ErrorTimeout => &[],
        }
    }
}

impl Format {
    /// File extension for documents rendered in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Edi => "edi",
            Format::Json => "json",
        }
    }

    /// MIME type for documents rendered in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Edi => crate::constants::MIME_TYPE_EDI,
            Format::Json => crate::constants::MIME_TYPE_JSON,
        }
    }
}

/// Render a domain the way validation messages list it: `[A, B, C]`.
pub fn domain_list<T: fmt::Display>(values: &[T]) -> String {
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
