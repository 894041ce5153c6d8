use serde::{Deserialize, Serialize};

use crate::data_structures::{fixed8::Fixed8, hash::UInt256};

/// Reference to an output of an earlier transaction (34 bytes on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputReference {
    /// Id of the transaction that created the output
    pub txid: UInt256,
    /// Position of the output in that transaction
    pub index: u16,
}

impl OutputReference {
    pub const WIRE_LEN: usize = UInt256::LEN + 2;

    pub fn new(txid: UInt256, index: u16) -> Self {
        Self { txid, index }
    }
}

/// A spendable output as reported by the balance source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub txid: UInt256,
    pub index: u16,
    pub value: Fixed8,
}

impl UnspentOutput {
    pub fn new(txid: UInt256, index: u16, value: Fixed8) -> Self {
        Self { txid, index, value }
    }

    pub fn reference(&self) -> OutputReference {
        OutputReference::new(self.txid, self.index)
    }
}

/// GAS that can be claimed from spent NEO outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimable {
    /// Outputs whose generated GAS is being claimed
    pub claims: Vec<OutputReference>,
    /// Total GAS accrued by those outputs
    pub amount: Fixed8,
}

impl Claimable {
    pub fn new(claims: Vec<OutputReference>, amount: Fixed8) -> Self {
        Self { claims, amount }
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty() || !self.amount.is_positive()
    }
}
