//! Configuration for transaction building
//!
//! Everything here has a working default; callers usually only change the
//! address version when targeting a private network.

use serde::{Deserialize, Serialize};

use crate::{
    codec::MAX_PREFIXED_LEN,
    errors::{WalletError, WalletResult},
    key_management::{NeoAddressCodec, DEFAULT_ADDRESS_VERSION},
    signing::prepare::InputSelector,
};

/// Remark attached to native asset sends
pub const DEFAULT_SEND_REMARK: &str = "O3XSEND";
/// Remark attached to GAS claims
pub const DEFAULT_CLAIM_REMARK: &str = "O3XCLAIM";
/// Prefix of the timestamped remark attached to token transfers
pub const DEFAULT_TOKEN_REMARK_PREFIX: &str = "O3X";

/// Settings shared by every transaction a [`crate::wallet::TransactionService`] builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Version byte of display addresses
    pub address_version: u8,
    /// Remark on asset transfers, `None` to omit
    pub send_remark: Option<String>,
    /// Remark on claims, `None` to omit
    pub claim_remark: Option<String>,
    /// Token transfer remarks are this prefix followed by a timestamp
    pub token_remark_prefix: String,
    /// Most inputs a single transaction may spend
    pub max_inputs: usize,
    /// Refuse GAS sends that would leave no more than the dust amount behind
    pub enforce_gas_reserve: bool,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            address_version: DEFAULT_ADDRESS_VERSION,
            send_remark: Some(DEFAULT_SEND_REMARK.to_string()),
            claim_remark: Some(DEFAULT_CLAIM_REMARK.to_string()),
            token_remark_prefix: DEFAULT_TOKEN_REMARK_PREFIX.to_string(),
            max_inputs: MAX_PREFIXED_LEN,
            enforce_gas_reserve: true,
        }
    }
}

impl TransactionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> WalletResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_address_version(mut self, version: u8) -> Self {
        self.address_version = version;
        self
    }

    pub fn with_send_remark(mut self, remark: Option<String>) -> Self {
        self.send_remark = remark;
        self
    }

    pub fn with_claim_remark(mut self, remark: Option<String>) -> Self {
        self.claim_remark = remark;
        self
    }

    pub fn with_token_remark_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.token_remark_prefix = prefix.into();
        self
    }

    pub fn with_max_inputs(mut self, max_inputs: usize) -> Self {
        self.max_inputs = max_inputs;
        self
    }

    pub fn with_gas_reserve_check(mut self, enforce: bool) -> Self {
        self.enforce_gas_reserve = enforce;
        self
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.max_inputs == 0 || self.max_inputs > MAX_PREFIXED_LEN {
            return Err(WalletError::ConfigurationError(format!(
                "max_inputs must be between 1 and {MAX_PREFIXED_LEN}, got {}",
                self.max_inputs
            )));
        }
        let remarks = [
            ("send_remark", self.send_remark.as_deref().unwrap_or("")),
            ("claim_remark", self.claim_remark.as_deref().unwrap_or("")),
            ("token_remark_prefix", self.token_remark_prefix.as_str()),
        ];
        for (name, remark) in remarks {
            if remark.len() > MAX_PREFIXED_LEN {
                return Err(WalletError::ConfigurationError(format!(
                    "{name} is {} bytes, at most {MAX_PREFIXED_LEN} allowed",
                    remark.len()
                )));
            }
        }
        Ok(())
    }

    pub fn address_codec(&self) -> NeoAddressCodec {
        NeoAddressCodec::new(self.address_version)
    }

    pub fn input_selector(&self) -> InputSelector {
        InputSelector::new().with_max_inputs(self.max_inputs)
    }

    /// Remark for a token transfer made at `timestamp`
    pub fn token_remark(&self, timestamp: &str) -> String {
        format!("{}{timestamp}", self.token_remark_prefix)
    }
}
