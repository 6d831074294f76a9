//! Typed-message hashing and Stark-curve signing.
//!
//! Implements the counterparty's SNIP-12 (rev 0) signing scheme:
//! 1. Encode message fields into felts (`felt` module)
//! 2. Build a schema-validated typed message (`typed_data` module)
//! 3. Compute the domain-separated, address-bound Pedersen commitment
//!    (`hasher` module)
//! 4. Sign the digest on the Stark curve with a random or RFC 6979
//!    deterministic nonce (`signer` module)
//!
//! The `messages` module carries the two concrete message templates the bot
//! signs: the `/v1/auth` challenge and the order payload.

pub mod error;
pub mod felt;
pub mod hasher;
pub mod messages;
pub mod signer;
pub mod typed_data;

pub use error::{CryptoError, EncodingError, HashError, SchemaError, SignError};
pub use felt::{decode_shortstring, encode_decimal, encode_shortstring, felt_from_hex, Felt};
pub use hasher::{compute_hash_on_elements, message_hash, starknet_selector};
pub use messages::{
    auth_message, chain_id_felt, order_message, sign_auth_message, sign_order_message,
    OrderSigningParams, AUTH_VALIDITY_SECS,
};
pub use signer::{verify_signature, NonceMode, Signature, SigningKey};
pub use typed_data::{FieldDef, FieldType, TypeDefinition, TypedMessage, Value, DOMAIN_TYPE};
