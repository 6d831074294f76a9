//! Authenticated REST client for the Paradex venue.
//!
//! One [`ExchangeClient`] per account per trade cycle: it carries the
//! account's proxy, user agent, signing key, and (after [`ExchangeClient::
//! authenticate`]) a bearer token. Request signing lives in `pdx-crypto`;
//! this crate owns the wire shapes and the retry policy.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{fetch_system_config, ExchangeClient};
pub use error::{ClientError, Result};
pub use retry::{retry, RetryPolicy};
pub use types::{
    AccountInfo, AuthResponse, OrderAck, OrderPayload, Position, PositionsResponse, SystemConfig,
};
