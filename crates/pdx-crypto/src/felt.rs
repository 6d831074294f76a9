//! Felt codec: strings and numbers into field elements.
//!
//! Short strings are packed big-endian byte-by-byte into an integer, the
//! counterparty's `encode_shortstring`. At most 31 ASCII bytes fit below the
//! field modulus, which makes the encoding bijective on its valid domain.
//! Numeric quantities are scaled by an explicit caller-supplied factor; the
//! codec never infers scale.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::EncodingError;

pub use starknet_crypto::FieldElement as Felt;

/// Maximum byte length of a short string (31 bytes = 248 bits < 251-bit felt).
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// Encode an ASCII string of at most 31 bytes as a felt.
pub fn encode_shortstring(s: &str) -> Result<Felt, EncodingError> {
    if !s.is_ascii() {
        return Err(EncodingError::NonAscii);
    }
    let bytes = s.as_bytes();
    if bytes.len() > SHORT_STRING_MAX_LEN {
        return Err(EncodingError::TooLong {
            len: bytes.len(),
            max: SHORT_STRING_MAX_LEN,
        });
    }
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(bytes);
    Felt::from_bytes_be(&buf).map_err(|_| EncodingError::Overflow(s.to_string()))
}

/// Decode a felt back into the short string it encodes.
///
/// Inverse of [`encode_shortstring`] for strings without a leading NUL byte.
pub fn decode_shortstring(felt: &Felt) -> Result<String, EncodingError> {
    let bytes = felt.to_bytes_be();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let tail = &bytes[start..];
    if tail.len() > SHORT_STRING_MAX_LEN {
        return Err(EncodingError::TooLong {
            len: tail.len(),
            max: SHORT_STRING_MAX_LEN,
        });
    }
    if !tail.is_ascii() {
        return Err(EncodingError::NonAscii);
    }
    Ok(String::from_utf8_lossy(tail).into_owned())
}

/// Encode a non-negative decimal quantity at an explicit scale.
///
/// The value is multiplied by `10^scale` and must land on an integer;
/// a fractional remainder means the caller picked the wrong scale for the
/// field and is rejected rather than silently truncated.
pub fn encode_decimal(value: Decimal, scale: u32) -> Result<Felt, EncodingError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EncodingError::Negative(value.to_string()));
    }
    let factor = Decimal::from(10u64.pow(scale));
    let scaled = value
        .checked_mul(factor)
        .ok_or_else(|| EncodingError::Overflow(value.to_string()))?;
    if !scaled.fract().is_zero() {
        return Err(EncodingError::FractionalRemainder {
            value: value.to_string(),
            scale,
        });
    }
    let units = scaled
        .trunc()
        .to_u128()
        .ok_or_else(|| EncodingError::Overflow(value.to_string()))?;
    Ok(felt_from_u128(units))
}

/// Build a felt from a u128.
pub fn felt_from_u128(value: u128) -> Felt {
    let mut buf = [0u8; 32];
    buf[16..].copy_from_slice(&value.to_be_bytes());
    // 128 bits always fit below the 251-bit modulus.
    Felt::from_bytes_be(&buf).expect("u128 fits the field")
}

/// Parse a 0x-prefixed (or bare) hex felt, e.g. an account address.
pub fn felt_from_hex(s: &str) -> Result<Felt, EncodingError> {
    let trimmed = s.trim().trim_start_matches("0x");
    Felt::from_hex_be(trimmed).map_err(|_| EncodingError::InvalidHex(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shortstring_round_trip() {
        for s in ["Paradex", "1", "POST", "/v1/auth", "BTC-USD-PERP", "a"] {
            let felt = encode_shortstring(s).unwrap();
            assert_eq!(decode_shortstring(&felt).unwrap(), s);
        }
    }

    #[test]
    fn test_shortstring_max_length() {
        let ok = "a".repeat(31);
        assert!(encode_shortstring(&ok).is_ok());

        let too_long = "a".repeat(32);
        assert!(matches!(
            encode_shortstring(&too_long),
            Err(EncodingError::TooLong { len: 32, .. })
        ));
    }

    #[test]
    fn test_shortstring_rejects_non_ascii() {
        assert!(matches!(
            encode_shortstring("héllo"),
            Err(EncodingError::NonAscii)
        ));
    }

    #[test]
    fn test_shortstring_known_value() {
        // "1" packs to the single byte 0x31.
        let felt = encode_shortstring("1").unwrap();
        assert_eq!(felt, Felt::from(0x31u64));
    }

    #[test]
    fn test_shortstring_distinct_inputs_distinct_felts() {
        let a = encode_shortstring("BUY").unwrap();
        let b = encode_shortstring("SELL").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_encode_decimal_whole_units() {
        assert_eq!(
            encode_decimal(dec!(100), 0).unwrap(),
            Felt::from(100u64)
        );
        assert_eq!(
            encode_decimal(dec!(1.25), 2).unwrap(),
            Felt::from(125u64)
        );
    }

    #[test]
    fn test_encode_decimal_rejects_fractional_remainder() {
        assert!(matches!(
            encode_decimal(dec!(1.255), 2),
            Err(EncodingError::FractionalRemainder { .. })
        ));
    }

    #[test]
    fn test_encode_decimal_rejects_negative() {
        assert!(matches!(
            encode_decimal(dec!(-5), 0),
            Err(EncodingError::Negative(_))
        ));
    }

    #[test]
    fn test_felt_from_hex() {
        let felt = felt_from_hex("0x1f").unwrap();
        assert_eq!(felt, Felt::from(31u64));
        assert!(felt_from_hex("0xzz").is_err());
    }
}
