//! Base58Check addresses and script hashes

use digest::Digest;
use ripemd::Ripemd160;
use sha2::Sha256;

use crate::data_structures::UInt160;
use crate::errors::{WalletError, WalletResult};

/// Address version byte used by NEO 2.x main and test networks
pub const DEFAULT_ADDRESS_VERSION: u8 = 0x17;

const CHECKSUM_LEN: usize = 4;

/// Converts display addresses into the script hashes embedded in outputs
pub trait AddressCodec: Send + Sync {
    fn decode_address(&self, address: &str) -> WalletResult<UInt160>;

    fn validate_address(&self, address: &str) -> bool {
        self.decode_address(address).is_ok()
    }
}

/// `base58(version || script_hash || sha256d(..)[..4])`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeoAddressCodec {
    version: u8,
}

impl Default for NeoAddressCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS_VERSION)
    }
}

impl NeoAddressCodec {
    pub fn new(version: u8) -> Self {
        Self { version }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn encode_address(&self, script_hash: &UInt160) -> String {
        let mut payload = Vec::with_capacity(1 + UInt160::LEN);
        payload.push(self.version);
        payload.extend_from_slice(script_hash.as_wire_bytes());
        base58check_encode(&payload)
    }
}

impl AddressCodec for NeoAddressCodec {
    fn decode_address(&self, address: &str) -> WalletResult<UInt160> {
        let payload = base58check_decode(address.trim())
            .map_err(|e| WalletError::InvalidAddress(format!("{address}: {e}")))?;
        if payload.len() != 1 + UInt160::LEN {
            return Err(WalletError::InvalidAddress(format!(
                "{address}: expected {} payload bytes, got {}",
                1 + UInt160::LEN,
                payload.len()
            )));
        }
        if payload[0] != self.version {
            return Err(WalletError::InvalidAddress(format!(
                "{address}: version 0x{:02x} does not match 0x{:02x}",
                payload[0], self.version
            )));
        }
        UInt160::from_wire_slice(&payload[1..])
    }
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data).into_string()
}

pub fn base58check_decode(s: &str) -> WalletResult<Vec<u8>> {
    let mut data = bs58::decode(s)
        .into_vec()
        .map_err(|e| WalletError::DecodingError(format!("invalid base58: {e}")))?;
    if data.len() < CHECKSUM_LEN {
        return Err(WalletError::DecodingError("base58 data too short".to_string()));
    }
    let payload_len = data.len() - CHECKSUM_LEN;
    if checksum(&data[..payload_len]) != data[payload_len..] {
        return Err(WalletError::DecodingError("checksum mismatch".to_string()));
    }
    data.truncate(payload_len);
    Ok(data)
}

/// `RIPEMD160(SHA256(script))`, in wire order
pub fn script_hash_from_script(script: &[u8]) -> UInt160 {
    let hash = Ripemd160::digest(Sha256::digest(script));
    let mut out = [0u8; UInt160::LEN];
    out.copy_from_slice(&hash);
    UInt160::from_wire_bytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "ALq7AWrhAueN6mJNqk6FHJjnsEoPRytLdW";
    const SCRIPT_HASH: &str = "cef0c0fdcfe7838eff6ff104f9cdec2922297537";

    #[test]
    fn test_decode_known_address() {
        let codec = NeoAddressCodec::default();
        let hash = codec.decode_address(ADDRESS).unwrap();
        assert_eq!(hash.to_display_hex(), SCRIPT_HASH);
        assert_eq!(codec.encode_address(&hash), ADDRESS);
    }

    #[test]
    fn test_bad_checksum_is_invalid() {
        let codec = NeoAddressCodec::default();
        let tampered = ADDRESS.replace('W', "X");
        assert!(!codec.validate_address(&tampered));
        assert!(matches!(
            codec.decode_address(&tampered),
            Err(WalletError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_wrong_version_is_invalid() {
        // Same script hash encoded with version 0x35
        let codec = NeoAddressCodec::default();
        assert!(codec.validate_address("AJtMWeRsAB44zAHwNEqe5uELJ1AHoHxEfL"));
        assert!(!codec.validate_address("NP2T3uNWTaxMXAUY6pqCdfPwB8tb6E6erL"));
        assert!(NeoAddressCodec::new(0x35).validate_address("NP2T3uNWTaxMXAUY6pqCdfPwB8tb6E6erL"));
    }

    #[test]
    fn test_not_base58() {
        assert!(!NeoAddressCodec::default().validate_address("0OIl"));
        assert!(!NeoAddressCodec::default().validate_address(""));
    }

    #[test]
    fn test_script_hash_from_verification_script() {
        let public_key =
            hex::decode("02028a99826edc0c97d18e22b6932373d908d323aa7f92656a77ec26e8861699ef")
                .unwrap();
        let mut script = vec![0x21];
        script.extend_from_slice(&public_key);
        script.push(0xac);
        assert_eq!(script_hash_from_script(&script).to_display_hex(), SCRIPT_HASH);
    }
}
