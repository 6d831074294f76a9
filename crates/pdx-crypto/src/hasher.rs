//! Domain-separated Pedersen hashing of typed messages.
//!
//! Each struct is hashed as a Pedersen chain over its type hash followed by
//! its encoded field values in declared order. The final digest binds the
//! `"StarkNet Message"` prefix, the domain struct hash, the signer address,
//! and the primary struct hash, so a signature is only valid for one account
//! on one chain.

use sha3::{Digest, Keccak256};
use starknet_crypto::pedersen_hash;

use std::collections::BTreeMap;

use crate::error::{HashError, SchemaError};
use crate::felt::{encode_shortstring, felt_from_u128, Felt};
use crate::typed_data::{FieldDef, FieldType, TypedMessage, Value, DOMAIN_TYPE};

/// Prefix felt mixed into every message digest.
pub const STARKNET_MESSAGE_PREFIX: &str = "StarkNet Message";

/// Selector of a name: keccak256 with the top 6 bits cleared so the result
/// fits the 250-bit selector space.
pub fn starknet_selector(name: &str) -> Felt {
    let mut bytes: [u8; 32] = Keccak256::digest(name.as_bytes()).into();
    bytes[0] &= 0x03;
    // 250 bits always fit below the 251-bit modulus.
    Felt::from_bytes_be(&bytes).expect("masked selector fits the field")
}

/// Pedersen-chain hash: fold from zero, then append the element count.
pub fn compute_hash_on_elements(elements: &[Felt]) -> Felt {
    let folded = elements
        .iter()
        .fold(Felt::ZERO, |acc, e| pedersen_hash(&acc, e));
    pedersen_hash(&folded, &Felt::from(elements.len() as u64))
}

/// Selector over the full encoded type string of `name`.
pub fn type_hash(message: &TypedMessage, name: &str) -> Result<Felt, SchemaError> {
    Ok(starknet_selector(&message.encode_type(name)?))
}

/// Hash one struct instance: type hash first, then each field value encoded
/// in declared order.
pub fn struct_hash(
    message: &TypedMessage,
    type_name: &str,
    values: &BTreeMap<String, Value>,
) -> Result<Felt, HashError> {
    let def = message.type_def(type_name)?;
    let mut elements = Vec::with_capacity(def.fields.len() + 1);
    elements.push(type_hash(message, type_name)?);
    for field in &def.fields {
        let value = values
            .get(&field.name)
            .ok_or_else(|| SchemaError::MissingField {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            })?;
        elements.push(encode_field(message, field, value)?);
    }
    Ok(compute_hash_on_elements(&elements))
}

/// Final address-bound digest of a typed message.
///
/// Rejects the zero address: an unbound digest would verify for no one and
/// indicates the caller forgot to thread the signer through.
pub fn message_hash(message: &TypedMessage, signer_address: &Felt) -> Result<Felt, HashError> {
    if *signer_address == Felt::ZERO {
        return Err(HashError::UnboundSigner);
    }
    let prefix = encode_shortstring(STARKNET_MESSAGE_PREFIX)?;
    let domain = struct_hash(message, DOMAIN_TYPE, message.domain_values())?;
    let primary = struct_hash(message, message.primary_type(), message.message_values())?;
    Ok(compute_hash_on_elements(&[
        prefix,
        domain,
        *signer_address,
        primary,
    ]))
}

fn encode_field(
    message: &TypedMessage,
    field: &FieldDef,
    value: &Value,
) -> Result<Felt, HashError> {
    match (&field.ty, value) {
        (FieldType::Felt, Value::Felt(felt)) => Ok(*felt),
        (FieldType::Felt, Value::Uint(n)) => Ok(felt_from_u128(*n)),
        (FieldType::Felt | FieldType::ShortString, Value::Text(s)) => {
            Ok(encode_shortstring(s)?)
        }
        (FieldType::Struct(referenced), Value::Struct(nested)) => {
            struct_hash(message, referenced, nested)
        }
        _ => Err(SchemaError::TypeMismatch {
            type_name: message.primary_type().to_string(),
            field: field.name.clone(),
        }
        .into()),
    }
}
