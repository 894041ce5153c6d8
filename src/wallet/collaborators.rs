//! Interfaces to the outside world
//!
//! Balances come from an [`UnspentSource`] and signed payloads leave through a
//! [`BroadcastClient`]. Implementations should report failures as
//! [`WalletError::CollaboratorError`](crate::WalletError::CollaboratorError).

use async_trait::async_trait;

pub use crate::key_management::AddressCodec;
use crate::{
    data_structures::{AssetBalance, Claimable},
    errors::WalletResult,
    signing::models::SignedPayload,
};

/// Source of spendable outputs and claimable GAS for an address
#[async_trait]
pub trait UnspentSource: Send + Sync {
    /// Snapshot of unspent outputs, grouped by asset
    async fn fetch_unspent(&self, address: &str) -> WalletResult<AssetBalance>;

    /// Outputs whose GAS can currently be claimed
    async fn fetch_claimable(&self, address: &str) -> WalletResult<Claimable>;
}

/// Submits signed payloads to the network
#[async_trait]
pub trait BroadcastClient: Send + Sync {
    /// Returns whether the node accepted the transaction
    async fn submit_raw_transaction(&self, payload: &SignedPayload) -> WalletResult<bool>;
}
