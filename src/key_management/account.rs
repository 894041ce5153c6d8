//! Account key material
//!
//! An [`Account`] is passed explicitly into every build/sign call; there is no
//! process-wide current account.

use std::fmt::{Debug, Formatter};

use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::data_structures::UInt160;
use crate::errors::{WalletError, WalletResult};
use crate::key_management::address::{
    base58check_decode, base58check_encode, script_hash_from_script, NeoAddressCodec,
};
use crate::script::{verification_script, COMPRESSED_PUBLIC_KEY_LEN};

/// Length of a raw secp256r1 private key
pub const PRIVATE_KEY_LEN: usize = 32;
/// Length of an `r || s` signature
pub const SIGNATURE_LEN: usize = 64;

const WIF_PREFIX: u8 = 0x80;
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Signing key plus the public data derived from it
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    public_key: [u8; COMPRESSED_PUBLIC_KEY_LEN],
    script_hash: UInt160,
    address: String,
}

impl Account {
    /// Generate a fresh key from the OS random source
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    pub fn from_private_key_bytes(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(WalletError::SigningError(format!(
                "private key must be {PRIVATE_KEY_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| WalletError::SigningError(format!("invalid private key: {e}")))?;
        Ok(Self::from_signing_key(signing_key))
    }

    pub fn from_private_key_hex(hex_str: &str) -> WalletResult<Self> {
        let bytes = Zeroizing::new(
            crate::hex_utils::decode_hex(hex_str)
                .map_err(|e| WalletError::SigningError(format!("invalid private key hex: {e}")))?,
        );
        Self::from_private_key_bytes(&bytes)
    }

    /// Import a compressed-key WIF string
    pub fn from_wif(wif: &str) -> WalletResult<Self> {
        let payload = Zeroizing::new(
            base58check_decode(wif.trim())
                .map_err(|e| WalletError::SigningError(format!("invalid WIF: {e}")))?,
        );
        if payload.len() != PRIVATE_KEY_LEN + 2
            || payload[0] != WIF_PREFIX
            || payload[PRIVATE_KEY_LEN + 1] != WIF_COMPRESSED_FLAG
        {
            return Err(WalletError::SigningError(
                "invalid WIF: expected a compressed mainnet key".to_string(),
            ));
        }
        Self::from_private_key_bytes(&payload[1..=PRIVATE_KEY_LEN])
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let mut public_key = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        public_key.copy_from_slice(signing_key.verifying_key().to_encoded_point(true).as_bytes());
        let script_hash = script_hash_from_script(&verification_script(&public_key));
        let address = NeoAddressCodec::default().encode_address(&script_hash);
        Self {
            signing_key,
            public_key,
            script_hash,
            address,
        }
    }

    pub fn wif(&self) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(PRIVATE_KEY_LEN + 2));
        payload.push(WIF_PREFIX);
        payload.extend_from_slice(&self.signing_key.to_bytes());
        payload.push(WIF_COMPRESSED_FLAG);
        Zeroizing::new(base58check_encode(&payload))
    }

    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.signing_key.to_bytes()))
    }

    pub fn public_key(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn verification_script(&self) -> Vec<u8> {
        verification_script(&self.public_key)
    }

    pub fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    /// Address under the default version byte
    pub fn address(&self) -> &str {
        &self.address
    }

    /// ECDSA over SHA-256 with RFC 6979 nonces, returned as `r || s`
    pub fn sign(&self, message: &[u8]) -> WalletResult<[u8; SIGNATURE_LEN]> {
        let signature: Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| WalletError::SigningError(e.to_string()))?;
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify_signature(&self.public_key, message, signature)
    }
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// Check an `r || s` signature against a compressed public key
pub fn verify_signature(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    verifying_key.verify(message, &signature).is_ok()
}
