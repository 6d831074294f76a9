//! Stark-curve ECDSA over message digests.
//!
//! The private scalar must lie in `[1, CURVE_ORDER)`; keys outside that range
//! are rejected at construction. Signing supports two nonce modes: RFC 6979
//! deterministic (reproducible, test-friendly) and random with rejection
//! sampling (the counterparty accepts either).

use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use starknet_crypto::{
    get_public_key, rfc6979_generate_k, sign, verify, SignError as EcdsaSignError,
};

use crate::error::SignError;
use crate::felt::{felt_from_hex, Felt};

/// Order of the Stark curve's base-point subgroup, big-endian.
static CURVE_ORDER_BYTES: Lazy<[u8; 32]> = Lazy::new(|| {
    felt_from_hex("0x0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f")
        .expect("curve order constant")
        .to_bytes_be()
});

fn is_valid_scalar(scalar: &Felt) -> bool {
    *scalar != Felt::ZERO && scalar.to_bytes_be() < *CURVE_ORDER_BYTES
}

/// Nonce generation strategy for [`SigningKey::sign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceMode {
    /// RFC 6979 deterministic nonce derived from key and digest.
    Deterministic,
    /// Fresh random nonce per signature, rejection-sampled into range.
    Random,
}

/// An `(r, s)` Stark-curve signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: Felt,
    pub s: Felt,
}

impl Signature {
    /// Render both components as decimal strings, the wire representation
    /// the counterparty expects in headers and order payloads.
    pub fn to_decimal_pair(&self) -> [String; 2] {
        [self.r.to_string(), self.s.to_string()]
    }
}

/// A range-checked private scalar.
#[derive(Clone)]
pub struct SigningKey {
    secret: Felt,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl SigningKey {
    /// Parse a hex-encoded private key.
    pub fn from_hex(hex: &str) -> Result<Self, SignError> {
        let secret = felt_from_hex(hex).map_err(|_| SignError::InvalidScalar)?;
        Self::from_felt(secret)
    }

    pub fn from_felt(secret: Felt) -> Result<Self, SignError> {
        if !is_valid_scalar(&secret) {
            return Err(SignError::InvalidScalar);
        }
        Ok(Self { secret })
    }

    /// Public key as the x-coordinate of `secret * G`.
    pub fn public_key(&self) -> Felt {
        get_public_key(&self.secret)
    }

    /// Sign a message digest.
    pub fn sign(&self, message_hash: &Felt, mode: NonceMode) -> Result<Signature, SignError> {
        match mode {
            NonceMode::Deterministic => {
                let k = rfc6979_generate_k(message_hash, &self.secret, None);
                self.sign_with_k(message_hash, &k)
            }
            NonceMode::Random => loop {
                let Some(k) = random_nonce() else { continue };
                match self.sign_with_k(message_hash, &k) {
                    Ok(sig) if sig.r != Felt::ZERO && sig.s != Felt::ZERO => return Ok(sig),
                    Ok(_) => continue,
                    // A degenerate k is resampled; anything else is fatal.
                    Err(SignError::Curve(_)) => continue,
                    Err(other) => return Err(other),
                }
            },
        }
    }

    fn sign_with_k(&self, message_hash: &Felt, k: &Felt) -> Result<Signature, SignError> {
        match sign(&self.secret, message_hash, k) {
            Ok(extended) => Ok(Signature {
                r: extended.r,
                s: extended.s,
            }),
            Err(EcdsaSignError::InvalidMessageHash) => Err(SignError::HashOutOfRange),
            Err(err) => Err(SignError::Curve(err.to_string())),
        }
    }
}

/// Sample a candidate nonce below 2^251, or `None` when out of range.
fn random_nonce() -> Option<Felt> {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    buf[0] &= 0x07;
    if buf >= *CURVE_ORDER_BYTES || buf == [0u8; 32] {
        return None;
    }
    Felt::from_bytes_be(&buf).ok()
}

/// Check an `(r, s)` pair against a public key and digest.
pub fn verify_signature(
    public_key: &Felt,
    message_hash: &Felt,
    signature: &Signature,
) -> Result<bool, SignError> {
    verify(public_key, message_hash, &signature.r, &signature.s)
        .map_err(|err| SignError::Curve(err.to_string()))
}
