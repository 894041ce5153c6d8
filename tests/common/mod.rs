//! Shared fixtures and mock collaborators for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use neo_payload_libs::{
    data_structures::{AssetBalance, AssetId, Claimable, Fixed8, UInt256, UnspentOutput},
    key_management::Account,
    signing::models::SignedPayload,
    wallet::{BroadcastClient, UnspentSource},
    WalletError, WalletResult,
};
use tracing_subscriber::EnvFilter;

pub const PRIVATE_KEY: &str = "7d128a6d096f0c14c3a25a2b0c41cf79661bfcb4a8cc95aaaea28bde4d732344";
pub const SENDER_ADDRESS: &str = "ALq7AWrhAueN6mJNqk6FHJjnsEoPRytLdW";
/// Address of script hash `[0x22; 20]`
pub const RECIPIENT_ADDRESS: &str = "AJtMWeRsAB44zAHwNEqe5uELJ1AHoHxEfL";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn account() -> Account {
    Account::from_private_key_hex(PRIVATE_KEY).expect("fixture key is valid")
}

/// Outputs of whole units, txid `[i + 1; 32]`, index 0
pub fn unspent(units: &[i64]) -> Vec<UnspentOutput> {
    units
        .iter()
        .enumerate()
        .map(|(i, u)| {
            UnspentOutput::new(
                UInt256::from_wire_bytes([i as u8 + 1; 32]),
                0,
                Fixed8::from_units(*u).expect("fixture amount fits"),
            )
        })
        .collect()
}

pub fn balance(neo: &[i64], gas: &[i64]) -> AssetBalance {
    AssetBalance::new()
        .with_unspent(AssetId::Neo, unspent(neo))
        .with_unspent(AssetId::Gas, unspent(gas))
}

#[derive(Debug, Clone, Default)]
pub struct MockUnspentSource {
    pub balance: AssetBalance,
    pub claimable: Claimable,
    pub fail: bool,
    pub requested_addresses: Arc<Mutex<Vec<String>>>,
}

impl MockUnspentSource {
    pub fn new(balance: AssetBalance) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    pub fn with_claimable(mut self, claimable: Claimable) -> Self {
        self.claimable = claimable;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn record(&self, address: &str) -> WalletResult<()> {
        self.requested_addresses
            .lock()
            .expect("lock")
            .push(address.to_string());
        if self.fail {
            return Err(WalletError::CollaboratorError("balance API unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UnspentSource for MockUnspentSource {
    async fn fetch_unspent(&self, address: &str) -> WalletResult<AssetBalance> {
        self.record(address)?;
        Ok(self.balance.clone())
    }

    async fn fetch_claimable(&self, address: &str) -> WalletResult<Claimable> {
        self.record(address)?;
        Ok(self.claimable.clone())
    }
}

#[derive(Debug, Clone)]
pub struct MockBroadcaster {
    pub accept: bool,
    pub submitted: Arc<Mutex<Vec<SignedPayload>>>,
}

impl MockBroadcaster {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            submitted: Arc::default(),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            submitted: Arc::default(),
        }
    }

    pub fn submitted(&self) -> Vec<SignedPayload> {
        self.submitted.lock().expect("lock").clone()
    }
}

#[async_trait]
impl BroadcastClient for MockBroadcaster {
    async fn submit_raw_transaction(&self, payload: &SignedPayload) -> WalletResult<bool> {
        self.submitted.lock().expect("lock").push(payload.clone());
        Ok(self.accept)
    }
}
