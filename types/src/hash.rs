//! 32-byte hash types for blocks and transactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a hash from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

fn parse_hash_bytes(s: &str) -> Result<[u8; 32], HashParseError> {
    let bytes = hex::decode(s).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| HashParseError::InvalidLength(len))
}

macro_rules! hash_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Parse from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
                parse_hash_bytes(s).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({}\u{2026})"), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = HashParseError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

hash_type!(
    /// A 32-byte block hash. A recent main-chain tip hash serves as the
    /// randomness anchor of the voter lottery.
    ChainHash
);

hash_type!(
    /// A 32-byte transaction hash (hash of the transaction prefix).
    TxHash
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let hash = ChainHash::new([0xab; 32]);
        let parsed: ChainHash = hash.to_string().parse().unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert_eq!(
            TxHash::from_hex("abcd"),
            Err(HashParseError::InvalidLength(2))
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            TxHash::from_hex("zz"),
            Err(HashParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn debug_is_abbreviated() {
        let hash = TxHash::new([0x01; 32]);
        assert_eq!(format!("{:?}", hash), "TxHash(01010101\u{2026})");
    }
}
