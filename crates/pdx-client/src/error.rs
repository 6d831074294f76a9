//! Client errors, split by whether a retry can help.
//!
//! Transport failures, non-2xx statuses, and malformed-but-plausibly-
//! transient responses are retryable. Crypto failures are deterministic:
//! retrying would resign the same bytes and fail the same way, so they
//! abort the operation immediately.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response missing expected field '{0}'")]
    MissingField(&'static str),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request signing failed: {0}")]
    Crypto(#[from] pdx_crypto::CryptoError),

    #[error("Client is not authenticated")]
    NotAuthenticated,
}

impl ClientError {
    /// Whether another attempt against the venue could succeed.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Status { .. } | Self::MissingField(_) | Self::Decode(_) => {
                true
            }
            Self::Crypto(_) | Self::NotAuthenticated => false,
        }
    }
}
