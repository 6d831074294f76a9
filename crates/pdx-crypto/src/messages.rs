//! The two concrete message templates the bot signs.
//!
//! Field names, types, and declared order mirror the counterparty's schema
//! exactly; any deviation produces a digest the venue will reject.

use std::collections::BTreeMap;

use pdx_core::{OrderSide, OrderType};
use rust_decimal::Decimal;

use crate::error::{CryptoError, EncodingError, SchemaError};
use crate::felt::{encode_decimal, encode_shortstring, Felt};
use crate::hasher::message_hash;
use crate::signer::{NonceMode, Signature, SigningKey};
use crate::typed_data::{FieldType, TypeDefinition, TypedMessage, Value, DOMAIN_TYPE};

/// Lifetime of an auth challenge signature.
pub const AUTH_VALIDITY_SECS: u64 = 1800;

const DOMAIN_NAME: &str = "Paradex";
const DOMAIN_VERSION: &str = "1";

/// Shortstring-encode a venue chain id (e.g. `"PRIVATE_SN_PARACLEAR"`).
pub fn chain_id_felt(chain_id: &str) -> Result<Felt, EncodingError> {
    encode_shortstring(chain_id)
}

fn domain_def() -> TypeDefinition {
    TypeDefinition::new(
        DOMAIN_TYPE,
        vec![
            ("name", FieldType::Felt),
            ("chainId", FieldType::Felt),
            ("version", FieldType::Felt),
        ],
    )
}

fn domain_values(chain_id: &Felt) -> BTreeMap<String, Value> {
    BTreeMap::from([
        ("name".to_string(), Value::Text(DOMAIN_NAME.to_string())),
        ("chainId".to_string(), Value::Felt(*chain_id)),
        ("version".to_string(), Value::Text(DOMAIN_VERSION.to_string())),
    ])
}

/// Build the `/v1/auth` challenge message.
///
/// `timestamp` and `expiration` are Unix seconds; the body field is always
/// the empty felt.
pub fn auth_message(
    chain_id: &Felt,
    timestamp: u64,
    expiration: u64,
) -> Result<TypedMessage, SchemaError> {
    let request = TypeDefinition::new(
        "Request",
        vec![
            ("method", FieldType::Felt),
            ("path", FieldType::Felt),
            ("body", FieldType::Felt),
            ("timestamp", FieldType::Felt),
            ("expiration", FieldType::Felt),
        ],
    );
    TypedMessage::new(
        vec![domain_def(), request],
        "Request",
        domain_values(chain_id),
        BTreeMap::from([
            ("method".to_string(), Value::Text("POST".to_string())),
            ("path".to_string(), Value::Text("/v1/auth".to_string())),
            ("body".to_string(), Value::Felt(Felt::ZERO)),
            ("timestamp".to_string(), Value::Uint(timestamp as u128)),
            ("expiration".to_string(), Value::Uint(expiration as u128)),
        ]),
    )
}

/// Everything that feeds an order signature.
#[derive(Debug, Clone)]
pub struct OrderSigningParams {
    /// Signature timestamp in Unix milliseconds.
    pub timestamp_ms: u64,
    pub market: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub size: Decimal,
    /// `None` for the market-order family; those sign a zero price.
    pub price: Option<Decimal>,
}

/// Build the order message.
pub fn order_message(
    chain_id: &Felt,
    params: &OrderSigningParams,
) -> Result<TypedMessage, CryptoError> {
    let order = TypeDefinition::new(
        "Order",
        vec![
            ("timestamp", FieldType::Felt),
            ("market", FieldType::Felt),
            ("side", FieldType::Felt),
            ("orderType", FieldType::Felt),
            ("size", FieldType::Felt),
            ("price", FieldType::Felt),
        ],
    );
    let size = encode_decimal(params.size, 0)?;
    let price = match params.price {
        Some(price) => encode_decimal(price, 0)?,
        None => Felt::ZERO,
    };
    let message = TypedMessage::new(
        vec![domain_def(), order],
        "Order",
        domain_values(chain_id),
        BTreeMap::from([
            (
                "timestamp".to_string(),
                Value::Uint(params.timestamp_ms as u128),
            ),
            ("market".to_string(), Value::Text(params.market.clone())),
            (
                "side".to_string(),
                Value::Text(params.side.signing_code().to_string()),
            ),
            (
                "orderType".to_string(),
                Value::Text(params.order_type.as_str().to_string()),
            ),
            ("size".to_string(), Value::Felt(size)),
            ("price".to_string(), Value::Felt(price)),
        ]),
    )?;
    Ok(message)
}

/// Hash and sign the auth challenge for one account.
pub fn sign_auth_message(
    key: &SigningKey,
    account_address: &Felt,
    chain_id: &Felt,
    timestamp: u64,
    expiration: u64,
    mode: NonceMode,
) -> Result<Signature, CryptoError> {
    let message = auth_message(chain_id, timestamp, expiration)?;
    let digest = message_hash(&message, account_address)?;
    Ok(key.sign(&digest, mode)?)
}

/// Hash and sign an order for one account.
pub fn sign_order_message(
    key: &SigningKey,
    account_address: &Felt,
    chain_id: &Felt,
    params: &OrderSigningParams,
    mode: NonceMode,
) -> Result<Signature, CryptoError> {
    let message = order_message(chain_id, params)?;
    let digest = message_hash(&message, account_address)?;
    Ok(key.sign(&digest, mode)?)
}
