//! Fixed-size hashes stored in wire (little-endian) order
//!
//! Display strings are big-endian, so parsing and printing reverse the bytes.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use digest::Digest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use crate::errors::{WalletError, WalletResult};
use crate::hex_utils::{decode_reversed_hex, encode_reversed_hex};

macro_rules! wire_hash {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            /// Wrap bytes that are already in wire order
            pub const fn from_wire_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_wire_slice(bytes: &[u8]) -> WalletResult<Self> {
                let bytes: [u8; $len] = bytes.try_into().map_err(|_| {
                    WalletError::InvalidHex(format!(
                        "expected {} bytes, got {}",
                        $len,
                        bytes.len()
                    ))
                })?;
                Ok(Self(bytes))
            }

            /// Parse big-endian display hex (optional `0x` prefix)
            pub fn from_display_hex(s: &str) -> WalletResult<Self> {
                decode_reversed_hex::<$len>(s).map(Self)
            }

            pub fn to_display_hex(&self) -> String {
                encode_reversed_hex(&self.0)
            }

            pub fn as_wire_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_display_hex())
            }
        }

        impl FromStr for $name {
            type Err = WalletError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_display_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_display_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_display_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_hash!(UInt256, 32, "32-byte hash: transaction ids and asset ids");
wire_hash!(UInt160, 20, "20-byte hash: script hashes and contract hashes");

impl UInt256 {
    /// Transaction id of a serialized unsigned transaction (double SHA-256)
    pub fn hash_of(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        let second = Sha256::digest(first);
        Self(second.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAS_DISPLAY: &str = "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7";

    #[test]
    fn test_display_hex_is_reversed_wire() {
        let hash = UInt256::from_display_hex(GAS_DISPLAY).unwrap();
        assert_eq!(hash.as_wire_bytes()[0], 0xe7);
        assert_eq!(hash.as_wire_bytes()[31], 0x60);
        assert_eq!(hash.to_string(), GAS_DISPLAY);
    }

    #[test]
    fn test_prefixed_hex() {
        let hash = UInt160::from_display_hex("0xecc6b20d3ccac1ee9ef109af5a7cdb85706b1df9").unwrap();
        assert_eq!(hash.as_wire_bytes()[0], 0xf9);
        assert_eq!(hash.to_display_hex(), "ecc6b20d3ccac1ee9ef109af5a7cdb85706b1df9");
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(UInt160::from_display_hex("0011").is_err());
        assert!(UInt256::from_wire_slice(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_serde_uses_display_hex() {
        let hash = UInt256::from_display_hex(GAS_DISPLAY).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{GAS_DISPLAY}\""));
        let back: UInt256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_hash_of_empty() {
        // sha256(sha256(""))
        assert_eq!(
            hex::encode(UInt256::hash_of(&[]).as_wire_bytes()),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }
}
