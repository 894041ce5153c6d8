//! Parse signed or unsigned payloads back into their parts

use serde::{Deserialize, Serialize};

use crate::{
    codec::BinaryReader,
    data_structures::{OutputReference, TransactionAttribute, TransactionOutput, UInt256},
    hex_utils::decode_hex,
    signing::models::{
        payload::{UnsignedPayload, Witness},
        transaction::{TransactionKind, UnsignedTransaction},
    },
    WalletError, WalletResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedTransaction {
    pub transaction: UnsignedTransaction,
    /// Empty for an unsigned payload
    pub witnesses: Vec<Witness>,
}

impl DecodedTransaction {
    pub fn from_bytes(bytes: &[u8]) -> WalletResult<Self> {
        let mut reader = BinaryReader::new(bytes);
        let transaction = UnsignedTransaction::read(&mut reader)?;
        let witnesses = if reader.is_empty() {
            Vec::new()
        } else {
            // Smallest witness is two empty scripts
            let count = reader.read_count("witnesses", 2)?;
            (0..count)
                .map(|_| Witness::decode(&mut reader))
                .collect::<WalletResult<Vec<_>>>()?
        };
        if !reader.is_empty() {
            return Err(WalletError::DecodingError(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(Self {
            transaction,
            witnesses,
        })
    }

    pub fn from_hex(hex_str: &str) -> WalletResult<Self> {
        Self::from_bytes(&decode_hex(hex_str)?)
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.transaction.kind
    }

    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.transaction.attributes
    }

    pub fn inputs(&self) -> &[OutputReference] {
        &self.transaction.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.transaction.outputs
    }

    pub fn is_signed(&self) -> bool {
        !self.witnesses.is_empty()
    }

    /// Re-pack the unsigned portion
    pub fn unsigned_payload(&self) -> WalletResult<UnsignedPayload> {
        self.transaction.serialize()
    }

    pub fn txid(&self) -> WalletResult<UInt256> {
        self.transaction.txid()
    }
}
