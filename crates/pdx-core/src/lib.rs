//! Core domain types for the Paradex hedge bot.
//!
//! This crate provides fundamental types used throughout the trading system:
//! - `OrderSide`, `OrderType`: trading enums with the exchange's wire casing
//! - `TradeRole`: per-cycle directional assignment within a hedge group
//! - `AccountDescriptor`: one trading account with its session identity
//! - `UniformRange` / `CycleRange`: validated `[min, max]` sampling ranges

pub mod account;
pub mod error;
pub mod order;
pub mod range;

pub use account::{AccountDescriptor, SecretKeyHex};
pub use error::{CoreError, Result};
pub use order::{OrderSide, OrderType, TradeRole};
pub use range::{CycleRange, UniformRange};
