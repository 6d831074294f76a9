//! Wire types for the venue's REST endpoints.
//!
//! The venue serializes numeric fields as strings; `rust_decimal`'s string
//! serde keeps full precision across the boundary.

use pdx_core::OrderSide;
use pdx_crypto::{OrderSigningParams, Signature};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subset of `/v1/system/config` the bot needs.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    pub starknet_chain_id: String,
}

/// Body of a successful `/v1/auth` response.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub jwt_token: Option<String>,
}

/// Account summary from `/v1/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub status: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free_collateral: Decimal,
}

impl AccountInfo {
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }
}

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Order side that flattens a position in this direction.
    pub fn closing_side(&self) -> OrderSide {
        match self {
            Self::Long => OrderSide::Sell,
            Self::Short => OrderSide::Buy,
        }
    }
}

/// One open position from `/v1/positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub market: String,
    pub side: PositionSide,
    #[serde(with = "rust_decimal::serde::str")]
    pub size: Decimal,
}

impl Position {
    /// Unsigned size to close the position in full.
    pub fn close_size(&self) -> Decimal {
        self.size.abs()
    }
}

#[derive(Debug, Deserialize)]
pub struct PositionsResponse {
    pub results: Vec<Position>,
}

/// Order submission body for `/v1/orders`.
#[derive(Debug, Serialize)]
pub struct OrderPayload {
    pub market: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub size: String,
    /// Omitted entirely for the market-order family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub instruction: String,
    pub stp: String,
    pub signature: String,
    pub signature_timestamp: u64,
}

impl OrderPayload {
    /// Assemble the body from the exact parameters that were signed.
    pub fn from_signed(params: &OrderSigningParams, signature: &Signature) -> Self {
        Self {
            market: params.market.clone(),
            side: params.side.to_string(),
            order_type: params.order_type.as_str().to_string(),
            size: params.size.to_string(),
            price: params.price.map(|p| p.to_string()),
            instruction: "GTC".to_string(),
            stp: "EXPIRE_TAKER".to_string(),
            signature: signature_json(signature),
            signature_timestamp: params.timestamp_ms,
        }
    }
}

/// Venue acknowledgement of a submitted order.
#[derive(Debug, Deserialize)]
pub struct OrderAck {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Render a signature as the JSON array of decimal strings the venue
/// expects in headers and order bodies.
pub fn signature_json(signature: &Signature) -> String {
    let [r, s] = signature.to_decimal_pair();
    format!(r#"["{r}","{s}"]"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdx_core::OrderType;
    use pdx_crypto::{NonceMode, SigningKey};
    use rust_decimal_macros::dec;

    fn signed_params(order_type: OrderType, price: Option<Decimal>) -> (OrderSigningParams, Signature) {
        let params = OrderSigningParams {
            timestamp_ms: 1_700_000_000_000,
            market: "BTC-USD-PERP".to_string(),
            side: OrderSide::Buy,
            order_type,
            size: dec!(3),
            price,
        };
        let key = SigningKey::from_hex("0xabc123").unwrap();
        let sig = key
            .sign(&pdx_crypto::Felt::from(7u64), NonceMode::Deterministic)
            .unwrap();
        (params, sig)
    }

    #[test]
    fn test_market_order_omits_price() {
        let (params, sig) = signed_params(OrderType::Market, None);
        let payload = OrderPayload::from_signed(&params, &sig);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("price").is_none());
        assert_eq!(json["type"], "MARKET");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["size"], "3");
        assert_eq!(json["instruction"], "GTC");
    }

    #[test]
    fn test_limit_order_carries_price() {
        let (params, sig) = signed_params(OrderType::Limit, Some(dec!(65000.5)));
        let payload = OrderPayload::from_signed(&params, &sig);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["price"], "65000.5");
    }

    #[test]
    fn test_signature_json_shape() {
        let (_, sig) = signed_params(OrderType::Market, None);
        let rendered = signature_json(&sig);
        let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|c| c.bytes().all(|b| b.is_ascii_digit())));
    }

    #[test]
    fn test_position_close_side_and_size() {
        let long: Position = serde_json::from_str(
            r#"{"market":"BTC-USD-PERP","side":"LONG","size":"1.5"}"#,
        )
        .unwrap();
        assert_eq!(long.side.closing_side(), OrderSide::Sell);
        assert_eq!(long.close_size(), dec!(1.5));

        let short: Position = serde_json::from_str(
            r#"{"market":"BTC-USD-PERP","side":"SHORT","size":"-2"}"#,
        )
        .unwrap();
        assert_eq!(short.side.closing_side(), OrderSide::Buy);
        assert_eq!(short.close_size(), dec!(2));
    }

    #[test]
    fn test_account_info_active_gate() {
        let active: AccountInfo =
            serde_json::from_str(r#"{"status":"ACTIVE","free_collateral":"100.25"}"#).unwrap();
        assert!(active.is_active());
        assert_eq!(active.free_collateral, dec!(100.25));

        let closed: AccountInfo =
            serde_json::from_str(r#"{"status":"CLOSED","free_collateral":"0"}"#).unwrap();
        assert!(!closed.is_active());
    }
}
