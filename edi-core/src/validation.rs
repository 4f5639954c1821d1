//! Field validation and classification.
//!
//! Checks run in a fixed order and stop at the first failure, so a request
//! with several bad fields always reports the same one:
//!
//! 1. transaction type is a known value
//! 2. format, when given, is a known value
//! 3. error transactions stop here
//! 4. response type is present
//! 5. response type is allowed for the transaction type
//! 6. ORDER carries a known order type

use thiserror::Error;

use crate::enums::{domain_list, Format, OrderType, ResponseType, TransactionType};
use crate::request::ClassificationFields;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// A classification field outside its valid domain.
///
/// This is the caller's fault and never a system fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid TRANSACTION TYPE: '{value}'. Valid values are: {}", domain_list(TransactionType::ALL))]
    InvalidTransactionType { value: String },

    #[error("Invalid FORMAT: '{value}'. Valid values are: {}", domain_list(Format::ALL))]
    InvalidFormat { value: String },

    #[error("RESPONSE TYPE is required.")]
    MissingResponseType,

    #[error(
        "Invalid RESPONSE TYPE: '{value}' for TRANSACTION TYPE '{transaction_type}'. Valid values are: {}",
        domain_list(transaction_type.allowed_response_types())
    )]
    InvalidResponseType {
        value: String,
        transaction_type: TransactionType,
    },

    #[error("ORDER TYPE is required when TRANSACTION TYPE is 'ORDER'. Valid values are: {}", domain_list(OrderType::ALL))]
    MissingOrderType,

    #[error("Invalid ORDER TYPE: '{value}'. Valid values are: {}", domain_list(OrderType::ALL))]
    InvalidOrderType { value: String },
}

/// Result of [`FieldValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// What an ORDER should be answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderReply {
    Ack,
    /// Acknowledgment followed by the ship confirmation.
    ShipConfirm,
}

/// What an ASN should be answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsnReply {
    Ack,
    /// Acknowledgment followed by the receipt.
    Receipt,
}

/// A validated transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    GetSchema {
        schema: ResponseType,
        /// Optional refinement; not domain-checked.
        order_type: Option<String>,
    },
    Order {
        order_type: OrderType,
        reply: OrderReply,
    },
    Asn {
        reply: AsnReply,
    },
    Item,
    ErrorResponse {
        response_type: Option<String>,
    },
    ErrorTimeout {
        response_type: Option<String>,
    },
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::GetSchema { .. } => TransactionType::GetSchema,
            Transaction::Order { .. } => TransactionType::Order,
            Transaction::Asn { .. } => TransactionType::Asn,
            Transaction::Item => TransactionType::Item,
            Transaction::ErrorResponse { .. } => TransactionType::ErrorResponse,
            Transaction::ErrorTimeout { .. } => TransactionType::ErrorTimeout,
        }
    }

    /// The response type as it should appear in filenames, if any.
    pub fn response_label(&self) -> Option<String> {
        match self {
            Transaction::GetSchema { schema, .. } => Some(schema.as_str().to_string()),
            Transaction::Order { reply, .. } => Some(
                match reply {
                    OrderReply::Ack => ResponseType::Ack,
                    OrderReply::ShipConfirm => ResponseType::ShipConfirm,
                }
                .as_str()
                .to_string(),
            ),
            Transaction::Asn { reply } => Some(
                match reply {
                    AsnReply::Ack => ResponseType::Ack,
                    AsnReply::Receipt => ResponseType::Receipt,
                }
                .as_str()
                .to_string(),
            ),
            Transaction::Item => Some(ResponseType::Ack.as_str().to_string()),
            Transaction::ErrorResponse { response_type }
            | Transaction::ErrorTimeout { response_type } => {
                response_type.as_ref().map(|r| r.to_uppercase())
            }
        }
    }
}

/// A validated request classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub transaction: Transaction,
    pub format: Option<Format>,
}

// ============================================================================
// FIELD VALIDATOR
// ============================================================================

/// Stateless validator for the four classification fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    /// Validate raw field values.
    ///
    /// Values are trimmed first; blank values count as absent.
    pub fn validate(
        transaction_type: Option<&str>,
        order_type: Option<&str>,
        format: Option<&str>,
        response_type: Option<&str>,
    ) -> ValidationOutcome {
        let fields = ClassificationFields::new(transaction_type, order_type, format, response_type);
        match Self::classify(&fields) {
            Ok(_) => ValidationOutcome::Valid,
            Err(e) => ValidationOutcome::Invalid(e.to_string()),
        }
    }

    /// Validate and turn the fields into a typed [`Classification`].
    pub fn classify(fields: &ClassificationFields<'_>) -> Result<Classification, ValidationError> {
        let raw_transaction = fields.transaction_type.unwrap_or_default();
        let transaction_type = TransactionType::parse(raw_transaction).map_err(|_| {
            ValidationError::InvalidTransactionType {
                value: raw_transaction.to_string(),
            }
        })?;

        let format = fields
            .format
            .map(|value| {
                Format::parse(value).map_err(|_| ValidationError::InvalidFormat {
                    value: value.to_string(),
                })
            })
            .transpose()?;

        let transaction = match transaction_type {
            TransactionType::ErrorResponse => Transaction::ErrorResponse {
                response_type: fields.response_type.map(str::to_string),
            },
            TransactionType::ErrorTimeout => Transaction::ErrorTimeout {
                response_type: fields.response_type.map(str::to_string),
            },
            TransactionType::GetSchema => Transaction::GetSchema {
                schema: Self::response_type(fields, transaction_type)?,
                order_type: fields.order_type.map(str::to_string),
            },
            TransactionType::Order => {
                let reply = match Self::response_type(fields, transaction_type)? {
                    ResponseType::ShipConfirm => OrderReply::ShipConfirm,
                    _ => OrderReply::Ack,
                };
                let raw_order = fields.order_type.ok_or(ValidationError::MissingOrderType)?;
                let order_type = OrderType::parse(raw_order).map_err(|_| {
                    ValidationError::InvalidOrderType {
                        value: raw_order.to_string(),
                    }
                })?;
                Transaction::Order { order_type, reply }
            }
            TransactionType::Asn => Transaction::Asn {
                reply: match Self::response_type(fields, transaction_type)? {
                    ResponseType::Receipt => AsnReply::Receipt,
                    _ => AsnReply::Ack,
                },
            },
            TransactionType::Item => {
                Self::response_type(fields, transaction_type)?;
                Transaction::Item
            }
        };

        Ok(Classification { transaction, format })
    }

    /// Required response type, checked against what the transaction allows.
    fn response_type(
        fields: &ClassificationFields<'_>,
        transaction_type: TransactionType,
    ) -> Result<ResponseType, ValidationError> {
        let raw_response = fields
            .response_type
            .ok_or(ValidationError::MissingResponseType)?;
        ResponseType::parse(raw_response)
            .ok()
            .filter(|r| transaction_type.allowed_response_types().contains(r))
            .ok_or_else(|| ValidationError::InvalidResponseType {
                value: raw_response.to_string(),
                transaction_type,
            })
    }
}
