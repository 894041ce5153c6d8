//! Hex helpers for display-order and wire-order byte strings
//!
//! NEO shows hashes big-endian (`0x`-prefixed or bare) while the wire carries
//! them little-endian. These helpers do the conversions in one place.

use crate::errors::{WalletError, WalletResult};

/// Trait for types that can be rendered as lowercase hex
pub trait HexEncodable {
    fn to_hex(&self) -> String;
}

impl HexEncodable for [u8] {
    fn to_hex(&self) -> String {
        hex::encode(self)
    }
}

impl HexEncodable for Vec<u8> {
    fn to_hex(&self) -> String {
        hex::encode(self)
    }
}

/// Strip an optional `0x`/`0X` prefix
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string, accepting an optional `0x` prefix
pub fn decode_hex(s: &str) -> WalletResult<Vec<u8>> {
    Ok(hex::decode(strip_hex_prefix(s.trim()))?)
}

/// Decode a hex string into exactly `N` bytes
pub fn decode_hex_fixed<const N: usize>(s: &str) -> WalletResult<[u8; N]> {
    let bytes = decode_hex(s)?;
    bytes.as_slice().try_into().map_err(|_| {
        WalletError::InvalidHex(format!("expected {N} bytes, got {}", bytes.len()))
    })
}

/// Decode display-order hex and return the bytes in wire order
pub fn decode_reversed_hex<const N: usize>(s: &str) -> WalletResult<[u8; N]> {
    let mut bytes = decode_hex_fixed::<N>(s)?;
    bytes.reverse();
    Ok(bytes)
}

/// Render wire-order bytes as display-order hex
pub fn encode_reversed_hex(bytes: &[u8]) -> String {
    let mut reversed = bytes.to_vec();
    reversed.reverse();
    hex::encode(reversed)
}
