//! Validation of send requests before any input is selected
//!
//! Checks run in a fixed order: amount, balance, GAS reserve, destination.
//! The first failing check decides the error.

use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{fixed8::FIXED8_SCALE, AssetId, Fixed8, UInt160},
    key_management::AddressCodec,
    WalletError, WalletResult,
};

/// What a send moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SendAsset {
    /// UTXO asset moved by a contract transaction
    Native { asset: AssetId },
    /// NEP-5 token moved by an invocation
    Token { contract: UInt160, decimals: u8 },
}

/// A user-initiated send, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub to_address: String,
    pub asset: SendAsset,
    pub amount: Fixed8,
}

impl SendRequest {
    pub fn native(to_address: impl Into<String>, asset: AssetId, amount: Fixed8) -> Self {
        Self {
            to_address: to_address.into(),
            asset: SendAsset::Native { asset },
            amount,
        }
    }

    pub fn token(
        to_address: impl Into<String>,
        contract: UInt160,
        decimals: u8,
        amount: Fixed8,
    ) -> Self {
        Self {
            to_address: to_address.into(),
            asset: SendAsset::Token { contract, decimals },
            amount,
        }
    }
}

#[derive(Clone, Copy)]
pub struct SendValidator<'a> {
    codec: &'a dyn AddressCodec,
    enforce_gas_reserve: bool,
}

impl<'a> SendValidator<'a> {
    pub fn new(codec: &'a dyn AddressCodec) -> Self {
        Self {
            codec,
            enforce_gas_reserve: true,
        }
    }

    pub fn with_gas_reserve_check(mut self, enforce: bool) -> Self {
        self.enforce_gas_reserve = enforce;
        self
    }

    /// Validate against the current balance of the sent asset; returns the destination hash
    pub fn validate(&self, request: &SendRequest, available: Fixed8) -> WalletResult<UInt160> {
        let amount = request.amount;
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount(format!(
                "amount must be positive, got {amount}"
            )));
        }
        match request.asset {
            SendAsset::Native { asset } if asset.is_indivisible() => {
                if amount.raw() % FIXED8_SCALE != 0 {
                    return Err(WalletError::InvalidAmount(format!(
                        "{} cannot be split, got {amount}",
                        asset.symbol().unwrap_or("asset")
                    )));
                }
            }
            SendAsset::Token { decimals, .. } => {
                amount.to_token_units(decimals)?;
            }
            SendAsset::Native { .. } => {}
        }

        if amount > available {
            return Err(WalletError::InsufficientBalance {
                available: available.to_string(),
                required: amount.to_string(),
            });
        }

        if self.enforce_gas_reserve && request.asset == (SendAsset::Native { asset: AssetId::Gas })
        {
            let remaining = available
                .checked_sub(amount)
                .ok_or_else(|| WalletError::AmountOverflow(format!("{available} - {amount}")))?;
            if remaining <= Fixed8::dust() {
                return Err(WalletError::GasReserve(format!(
                    "{remaining} GAS would remain"
                )));
            }
        }

        self.codec.decode_address(&request.to_address)
    }
}
