use semver::Version;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    data_structures::{Fixed8, UInt160, UInt256},
    signing::models::{
        payload::{SignedPayload, Witness},
        transaction::UnsignedTransaction,
    },
    WalletError, WalletResult,
};

pub fn get_supported_version() -> Version {
    Version::new(1, 0, 0)
}

pub trait HasVersion {
    fn get_version(&self) -> &Version;
}

/// Versioned JSON hand-off between the preparing and the signing side
pub trait TransactionResult: HasVersion + Serialize + DeserializeOwned + Sized {
    fn from_json(s: &str) -> Result<Self, WalletError> {
        let value: serde_json::Value =
            serde_json::from_str(s).map_err(|e| WalletError::DecodingError(e.to_string()))?;
        let version = value
            .get("version")
            .ok_or_else(|| WalletError::DecodingError("Missing version".into()))?;
        let version: Version = serde_json::from_value(version.clone())
            .map_err(|e| WalletError::DecodingError(e.to_string()))?;
        if version != get_supported_version() {
            return Err(WalletError::DecodingError(format!(
                "Unsupported version. Expected '{}', got '{}'",
                get_supported_version(),
                version
            )));
        }

        serde_json::from_value(value).map_err(|e| WalletError::DecodingError(e.to_string()))
    }

    fn to_json(&self) -> Result<String, WalletError> {
        serde_json::to_string(&self).map_err(|e| WalletError::EncodingError(e.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Transaction to be signed
    pub transaction: UnsignedTransaction,
    /// Script hash expected to sign
    pub sender: UInt160,
    /// Sum of the spent inputs
    pub input_total: Fixed8,
    /// Amount returned to the sender, zero when no change output exists
    pub change: Fixed8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrepareTransactionForSigningResult {
    pub version: Version,
    pub txid: UInt256,
    pub info: TransactionInfo,
}

impl PrepareTransactionForSigningResult {
    pub fn new(info: TransactionInfo) -> WalletResult<Self> {
        let txid = info.transaction.txid()?;
        Ok(Self {
            version: get_supported_version(),
            txid,
            info,
        })
    }
}

impl TransactionResult for PrepareTransactionForSigningResult {}

impl HasVersion for PrepareTransactionForSigningResult {
    fn get_version(&self) -> &Version {
        &self.version
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignedTransactionResult {
    pub version: Version,
    pub request: PrepareTransactionForSigningResult,
    pub witness: Witness,
    pub signed_payload: SignedPayload,
}

impl TransactionResult for SignedTransactionResult {}

impl HasVersion for SignedTransactionResult {
    fn get_version(&self) -> &Version {
        &self.version
    }
}
