//! Order-related types and hedge-group roles.
//!
//! Wire casing follows the exchange API: sides and order types are
//! upper-case strings in both JSON payloads and signed messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// The felt-encoded side marker used in signed order messages:
    /// "1" for buy, "2" for sell.
    pub fn signing_code(&self) -> &'static str {
        match self {
            Self::Buy => "1",
            Self::Sell => "2",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(CoreError::InvalidSide(other.to_string())),
        }
    }
}

/// Order type.
///
/// Only the market family is placed by the bot, but the full set is kept so
/// responses and close orders deserialize cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "MARKET")]
    Market,
    #[serde(rename = "LIMIT")]
    Limit,
    #[serde(rename = "STOP_MARKET")]
    StopMarket,
    #[serde(rename = "STOP_LOSS_MARKET")]
    StopLossMarket,
    #[serde(rename = "TAKE_PROFIT_MARKET")]
    TakeProfitMarket,
}

impl OrderType {
    /// Market-family orders carry no price in the outbound payload.
    pub fn is_market_family(&self) -> bool {
        matches!(
            self,
            Self::Market | Self::StopMarket | Self::StopLossMarket | Self::TakeProfitMarket
        )
    }

    /// Wire string, also used as the felt-encoded `orderType` signing field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopMarket => "STOP_MARKET",
            Self::StopLossMarket => "STOP_LOSS_MARKET",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directional role assigned to an account for one trading cycle.
///
/// Roles are positional within a hedge group (index 0 buys, index 1 sells,
/// index 2 short-sells at half size) and are handed to the trade cycle as an
/// immutable argument rather than mutated on the account record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeRole {
    Buy,
    Sell,
    ShortHalf,
}

impl TradeRole {
    /// The order side this role places on entry.
    pub fn entry_side(&self) -> OrderSide {
        match self {
            Self::Buy => OrderSide::Buy,
            Self::Sell | Self::ShortHalf => OrderSide::Sell,
        }
    }

    /// Whether the drawn position size is halved for this role.
    pub fn is_half_size(&self) -> bool {
        matches!(self, Self::ShortHalf)
    }
}

impl fmt::Display for TradeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::ShortHalf => write!(f, "SHORT_HALF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_order_side_wire_casing() {
        assert_eq!(serde_json::to_string(&OrderSide::Buy).unwrap(), r#""BUY""#);
        assert_eq!(
            serde_json::from_str::<OrderSide>(r#""SELL""#).unwrap(),
            OrderSide::Sell
        );
    }

    #[test]
    fn test_signing_codes() {
        assert_eq!(OrderSide::Buy.signing_code(), "1");
        assert_eq!(OrderSide::Sell.signing_code(), "2");
    }

    #[test]
    fn test_market_family() {
        assert!(OrderType::Market.is_market_family());
        assert!(OrderType::StopMarket.is_market_family());
        assert!(!OrderType::Limit.is_market_family());
    }

    #[test]
    fn test_role_sides() {
        assert_eq!(TradeRole::Buy.entry_side(), OrderSide::Buy);
        assert_eq!(TradeRole::Sell.entry_side(), OrderSide::Sell);
        assert_eq!(TradeRole::ShortHalf.entry_side(), OrderSide::Sell);
        assert!(TradeRole::ShortHalf.is_half_size());
        assert!(!TradeRole::Sell.is_half_size());
    }
}
