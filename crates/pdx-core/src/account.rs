//! Trading account descriptors.
//!
//! An `AccountDescriptor` is built once at startup by zipping the wallet,
//! proxy, and user-agent collections. It carries no per-cycle state: the
//! directional role lives with the scheduler and is passed into each trade
//! cycle explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Hex-encoded Stark private key.
///
/// Wrapped so the secret is zeroized on drop and never shows up in
/// `Debug`/`Display` output or logs.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretKeyHex(String);

impl SecretKeyHex {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Expose the raw hex. Callers must not log the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKeyHex(<redacted>)")
    }
}

/// One trading account with its dedicated session identity.
#[derive(Debug, Clone)]
pub struct AccountDescriptor {
    /// On-chain account address (0x-hex).
    pub address: String,
    /// Stark-curve private key.
    pub private_key: SecretKeyHex,
    /// Proxy endpoint this account's HTTP sessions route through.
    pub proxy: String,
    /// User-Agent header value for this account's sessions.
    pub user_agent: String,
    /// Stable position in the startup pool, used in log lines.
    pub index: usize,
}

impl AccountDescriptor {
    /// Short address form for logging (`0x1234..abcd`).
    pub fn short_address(&self) -> String {
        let a = &self.address;
        if a.len() > 10 {
            // get() keeps this panic-free even if a malformed wallets file
            // slips a multi-byte character into the address.
            if let (Some(head), Some(tail)) = (a.get(..6), a.get(a.len() - 4..)) {
                return format!("{head}..{tail}");
            }
        }
        a.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_debug_redacted() {
        let key = SecretKeyHex::new("0xdeadbeef");
        let dbg = format!("{key:?}");
        assert!(!dbg.contains("deadbeef"));
    }

    #[test]
    fn test_short_address() {
        let account = AccountDescriptor {
            address: "0x1234567890abcdef1234567890abcdef".to_string(),
            private_key: SecretKeyHex::new("0x1"),
            proxy: "http://127.0.0.1:8080".to_string(),
            user_agent: "ua".to_string(),
            index: 0,
        };
        assert_eq!(account.short_address(), "0x1234..cdef");
    }

    #[test]
    fn test_short_address_non_ascii_does_not_panic() {
        let account = AccountDescriptor {
            address: "0xこんにちは世界こんにちは".to_string(),
            private_key: SecretKeyHex::new("0x1"),
            proxy: "http://127.0.0.1:8080".to_string(),
            user_agent: "ua".to_string(),
            index: 0,
        };
        assert_eq!(account.short_address(), account.address);
    }
}
