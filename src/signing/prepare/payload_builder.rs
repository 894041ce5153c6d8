use crate::{
    data_structures::{
        AssetBalance, AssetId, Claimable, Fixed8, TransactionAttribute, TransactionOutput, UInt160,
    },
    script::nep5_transfer_script,
    signing::{
        models::{
            transaction::{TransactionKind, UnsignedTransaction},
            types::{PrepareTransactionForSigningResult, TransactionInfo},
        },
        prepare::input_selector::{InputSelector, UtxoSelection},
    },
    WalletError, WalletResult,
};

/// Builds unsigned transactions spending from a single sender
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    sender: UInt160,
    selector: InputSelector,
}

impl PayloadBuilder {
    pub fn new(sender: UInt160) -> Self {
        Self {
            sender,
            selector: InputSelector::new(),
        }
    }

    pub fn with_selector(mut self, selector: InputSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn sender(&self) -> UInt160 {
        self.sender
    }

    /// Contract transaction moving `amount` of `asset` to `recipient`
    pub fn transfer(
        &self,
        asset: AssetId,
        amount: Fixed8,
        recipient: UInt160,
        balance: &AssetBalance,
        attributes: Vec<TransactionAttribute>,
    ) -> WalletResult<PrepareTransactionForSigningResult> {
        if !amount.is_positive() {
            return Err(WalletError::InvalidAmount(format!(
                "transfer amount must be positive, got {amount}"
            )));
        }
        let selection = self.selector.select(asset, balance.unspent(&asset), amount)?;
        let outputs = self.build_outputs(&selection, recipient)?;

        tracing::info!(
            asset = asset.symbol().unwrap_or("asset"),
            amount = %amount,
            inputs = selection.utxos.len(),
            outputs = outputs.len(),
            "Prepared transfer"
        );

        let transaction = UnsignedTransaction::new(TransactionKind::Contract)
            .with_attributes(attributes)
            .with_inputs(selection.references())
            .with_outputs(outputs);
        self.prepare(transaction, &selection)
    }

    /// Claim transaction paying the accrued GAS back to the sender
    pub fn claim(
        &self,
        claimable: &Claimable,
        attributes: Vec<TransactionAttribute>,
    ) -> WalletResult<PrepareTransactionForSigningResult> {
        if claimable.is_empty() {
            return Err(WalletError::NothingToClaim);
        }

        tracing::info!(
            claims = claimable.claims.len(),
            amount = %claimable.amount,
            "Prepared claim"
        );

        let transaction = UnsignedTransaction::new(TransactionKind::Claim {
            claims: claimable.claims.clone(),
        })
        .with_attributes(attributes)
        .with_outputs(vec![TransactionOutput::new(
            AssetId::Gas,
            claimable.amount,
            self.sender,
        )]);
        self.prepare(transaction, &UtxoSelection::empty(AssetId::Gas))
    }

    /// Invocation transaction; with a GAS snapshot a dust amount is spent back to the sender
    pub fn invocation(
        &self,
        script: Vec<u8>,
        gas: Option<&AssetBalance>,
        attributes: Vec<TransactionAttribute>,
    ) -> WalletResult<PrepareTransactionForSigningResult> {
        if script.is_empty() {
            return Err(WalletError::EncodingError(
                "invocation script is empty".to_string(),
            ));
        }
        let selection = match gas {
            Some(balance) => {
                self.selector
                    .select(AssetId::Gas, balance.unspent(&AssetId::Gas), Fixed8::dust())?
            }
            None => UtxoSelection::empty(AssetId::Gas),
        };
        let outputs = self.build_outputs(&selection, self.sender)?;

        tracing::info!(
            script_len = script.len(),
            inputs = selection.utxos.len(),
            outputs = outputs.len(),
            "Prepared invocation"
        );

        let transaction = UnsignedTransaction::new(TransactionKind::Invocation { script })
            .with_attributes(attributes)
            .with_inputs(selection.references())
            .with_outputs(outputs);
        self.prepare(transaction, &selection)
    }

    /// NEP-5 `transfer` from the sender, tagged with the sender, a remark and the token hash
    pub fn token_transfer(
        &self,
        token: UInt160,
        recipient: UInt160,
        amount: i64,
        remark: &str,
        gas: Option<&AssetBalance>,
    ) -> WalletResult<PrepareTransactionForSigningResult> {
        let script = nep5_transfer_script(&token, &self.sender, &recipient, amount)?;
        let attributes = vec![
            TransactionAttribute::ScriptHash(self.sender),
            TransactionAttribute::remark(remark),
            TransactionAttribute::DescriptionHex(token.as_wire_bytes().iter().rev().copied().collect()),
        ];
        self.invocation(script, gas, attributes)
    }

    fn build_outputs(
        &self,
        selection: &UtxoSelection,
        recipient: UInt160,
    ) -> WalletResult<Vec<TransactionOutput>> {
        if selection.is_empty() {
            return Ok(Vec::new());
        }
        let mut outputs = vec![TransactionOutput::new(
            selection.asset,
            selection.requested,
            recipient,
        )];
        if let Some(change) = self.build_change_output(selection)? {
            outputs.push(change);
        }
        Ok(outputs)
    }

    fn build_change_output(
        &self,
        selection: &UtxoSelection,
    ) -> WalletResult<Option<TransactionOutput>> {
        let change = selection.change()?;
        if !change.is_positive() {
            return Ok(None);
        }
        Ok(Some(TransactionOutput::new(
            selection.asset,
            change,
            self.sender,
        )))
    }

    fn prepare(
        &self,
        transaction: UnsignedTransaction,
        selection: &UtxoSelection,
    ) -> WalletResult<PrepareTransactionForSigningResult> {
        let change = if selection.is_empty() {
            Fixed8::zero()
        } else {
            selection.change()?
        };
        PrepareTransactionForSigningResult::new(TransactionInfo {
            transaction,
            sender: self.sender,
            input_total: selection.total_value,
            change,
        })
    }
}
