//! Fluent construction of a [`TransactionService`]
//!
//! ```rust,no_run
//! # use neo_payload_libs::wallet::{TransactionServiceBuilder, UnspentSource, BroadcastClient};
//! # fn build<S: UnspentSource, B: BroadcastClient>(source: S, client: B) -> neo_payload_libs::WalletResult<()> {
//! let service = TransactionServiceBuilder::new()
//!     .with_unspent_source(source)
//!     .with_broadcaster(client)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::TransactionConfig,
    errors::{WalletError, WalletResult},
    wallet::{
        collaborators::{BroadcastClient, UnspentSource},
        transaction_service::TransactionService,
    },
};

pub struct TransactionServiceBuilder<S, B> {
    unspent_source: Option<S>,
    broadcaster: Option<B>,
    config: TransactionConfig,
}

impl<S, B> Default for TransactionServiceBuilder<S, B> {
    fn default() -> Self {
        Self {
            unspent_source: None,
            broadcaster: None,
            config: TransactionConfig::default(),
        }
    }
}

impl<S, B> TransactionServiceBuilder<S, B>
where
    S: UnspentSource,
    B: BroadcastClient,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unspent_source(mut self, source: S) -> Self {
        self.unspent_source = Some(source);
        self
    }

    pub fn with_broadcaster(mut self, broadcaster: B) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn with_config(mut self, config: TransactionConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the config from JSON; invalid JSON fails immediately
    pub fn with_config_json(mut self, json: &str) -> WalletResult<Self> {
        self.config = TransactionConfig::from_json(json)?;
        Ok(self)
    }

    pub fn build(self) -> WalletResult<TransactionService<S, B>> {
        let unspent_source = self.unspent_source.ok_or_else(|| {
            WalletError::ConfigurationError("Missing required parameter: unspent source".into())
        })?;
        let broadcaster = self.broadcaster.ok_or_else(|| {
            WalletError::ConfigurationError("Missing required parameter: broadcaster".into())
        })?;
        TransactionService::new(unspent_source, broadcaster, self.config)
    }
}
