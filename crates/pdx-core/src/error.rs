//! Error types for pdx-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid range [{min}, {max}]: min must not exceed max")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid side: {0}")]
    InvalidSide(String),

    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
