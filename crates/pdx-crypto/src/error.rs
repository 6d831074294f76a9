//! Error types for pdx-crypto.
//!
//! Encoding, schema, and signing errors are programming-time contract
//! violations: callers abort the enclosing operation instead of retrying.

use thiserror::Error;

/// A value cannot be represented as a felt.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Short string exceeds {max} bytes: {len}")]
    TooLong { len: usize, max: usize },

    #[error("Short string contains non-ASCII bytes")]
    NonAscii,

    #[error("Negative value cannot be encoded: {0}")]
    Negative(String),

    #[error("Value {value} has a fractional remainder at scale {scale}")]
    FractionalRemainder { value: String, scale: u32 },

    #[error("Value does not fit the field: {0}")]
    Overflow(String),

    #[error("Invalid hex felt: {0}")]
    InvalidHex(String),
}

/// Typed-message schema violation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Type '{0}' is not declared")]
    UnknownType(String),

    #[error("Field '{field}' missing from values for type '{type_name}'")]
    MissingField { type_name: String, field: String },

    #[error("Unexpected field '{field}' in values for type '{type_name}'")]
    UnexpectedField { type_name: String, field: String },

    #[error("Field '{field}' of type '{type_name}' has a mismatched value kind")]
    TypeMismatch { type_name: String, field: String },

    #[error("Cyclic type reference involving '{0}'")]
    CyclicTypes(String),
}

/// Hashing failure.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Message hash requested without a bound signer address")]
    UnboundSigner,

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Signing failure.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("Private scalar outside [1, CURVE_ORDER)")]
    InvalidScalar,

    #[error("Message hash out of range for the curve")]
    HashOutOfRange,

    #[error("Curve arithmetic error: {0}")]
    Curve(String),
}

/// Umbrella error for end-to-end message signing.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Sign(#[from] SignError),
}
