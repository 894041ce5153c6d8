//! Send, claim and invoke flows over the collaborator traits
//!
//! Each call fetches a fresh snapshot, builds and signs a single payload and
//! submits it once. Failures are returned as-is; nothing is retried.

use serde::{Deserialize, Serialize};

use crate::{
    config::TransactionConfig,
    data_structures::{AssetId, Fixed8, TransactionAttribute, UInt160, UInt256},
    key_management::{Account, AddressCodec, NeoAddressCodec},
    signing::{
        envelope::sign_prepared,
        models::{PrepareTransactionForSigningResult, SignedPayload},
        prepare::PayloadBuilder,
    },
    validation::{SendRequest, SendValidator},
    wallet::collaborators::{BroadcastClient, UnspentSource},
    WalletResult,
};

/// Outcome of a broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub txid: UInt256,
    /// Whether the node accepted the payload
    pub accepted: bool,
    pub payload: SignedPayload,
}

/// A NEP-5 transfer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub to_address: String,
    pub contract: UInt160,
    pub decimals: u8,
    pub amount: Fixed8,
    /// Sender's current token balance
    pub balance: Fixed8,
    /// Appended to the configured remark prefix
    pub timestamp: String,
}

pub struct TransactionService<S, B> {
    unspent_source: S,
    broadcaster: B,
    config: TransactionConfig,
}

impl<S, B> TransactionService<S, B>
where
    S: UnspentSource,
    B: BroadcastClient,
{
    pub fn new(unspent_source: S, broadcaster: B, config: TransactionConfig) -> WalletResult<Self> {
        config.validate()?;
        Ok(Self {
            unspent_source,
            broadcaster,
            config,
        })
    }

    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    /// Address of `account` under the configured version byte
    pub fn address_of(&self, account: &Account) -> String {
        self.codec().encode_address(&account.script_hash())
    }

    fn codec(&self) -> NeoAddressCodec {
        self.config.address_codec()
    }

    fn builder(&self, account: &Account) -> PayloadBuilder {
        PayloadBuilder::new(account.script_hash()).with_selector(self.config.input_selector())
    }

    fn validator<'a>(&self, codec: &'a dyn AddressCodec) -> SendValidator<'a> {
        SendValidator::new(codec).with_gas_reserve_check(self.config.enforce_gas_reserve)
    }

    /// Transfer a UTXO asset
    pub async fn send_asset(
        &self,
        account: &Account,
        to_address: &str,
        asset: AssetId,
        amount: Fixed8,
    ) -> WalletResult<SubmittedTransaction> {
        let address = self.address_of(account);
        let balance = self.unspent_source.fetch_unspent(&address).await?;
        let available = balance.total(&asset)?;

        let codec = self.codec();
        let recipient = self
            .validator(&codec)
            .validate(&SendRequest::native(to_address, asset, amount), available)?;

        let attributes = self
            .config
            .send_remark
            .iter()
            .map(TransactionAttribute::remark)
            .collect();
        let prepared = self
            .builder(account)
            .transfer(asset, amount, recipient, &balance, attributes)?;
        self.sign_and_submit(&prepared, account).await
    }

    /// Claim all currently claimable GAS back to the account
    pub async fn claim_gas(&self, account: &Account) -> WalletResult<SubmittedTransaction> {
        let claimable = self
            .unspent_source
            .fetch_claimable(&self.address_of(account))
            .await?;
        let attributes = self
            .config
            .claim_remark
            .iter()
            .map(TransactionAttribute::remark)
            .collect();
        let prepared = self.builder(account).claim(&claimable, attributes)?;
        self.sign_and_submit(&prepared, account).await
    }

    /// NEP-5 `transfer`; spends no UTXOs
    pub async fn send_token(
        &self,
        account: &Account,
        transfer: &TokenTransfer,
    ) -> WalletResult<SubmittedTransaction> {
        let codec = self.codec();
        let request = SendRequest::token(
            transfer.to_address.as_str(),
            transfer.contract,
            transfer.decimals,
            transfer.amount,
        );
        let recipient = self.validator(&codec).validate(&request, transfer.balance)?;
        let units = transfer.amount.to_token_units(transfer.decimals)?;

        let prepared = self.builder(account).token_transfer(
            transfer.contract,
            recipient,
            units,
            &self.config.token_remark(&transfer.timestamp),
            None,
        )?;
        self.sign_and_submit(&prepared, account).await
    }

    /// Run a script; with `attach_gas` a dust GAS spend is included
    pub async fn invoke_contract(
        &self,
        account: &Account,
        script: Vec<u8>,
        attributes: Vec<TransactionAttribute>,
        attach_gas: bool,
    ) -> WalletResult<SubmittedTransaction> {
        let builder = self.builder(account);
        let prepared = if attach_gas {
            let balance = self
                .unspent_source
                .fetch_unspent(&self.address_of(account))
                .await?;
            builder.invocation(script, Some(&balance), attributes)?
        } else {
            builder.invocation(script, None, attributes)?
        };
        self.sign_and_submit(&prepared, account).await
    }

    async fn sign_and_submit(
        &self,
        prepared: &PrepareTransactionForSigningResult,
        account: &Account,
    ) -> WalletResult<SubmittedTransaction> {
        let signed = sign_prepared(prepared, account)?;
        let payload = signed.signed_payload;
        let txid = payload.txid();

        let accepted = self.broadcaster.submit_raw_transaction(&payload).await?;
        if accepted {
            tracing::info!(
                txid = %txid,
                kind = prepared.info.transaction.kind.name(),
                "Transaction accepted"
            );
        } else {
            tracing::warn!(
                txid = %txid,
                kind = prepared.info.transaction.kind.name(),
                "Transaction rejected by node"
            );
        }

        Ok(SubmittedTransaction {
            txid,
            accepted,
            payload,
        })
    }
}
