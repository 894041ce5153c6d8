//! Wallet flows wired to external collaborators

pub mod builder;
pub mod collaborators;
pub mod nep9;
pub mod transaction_service;

pub use builder::TransactionServiceBuilder;
pub use collaborators::{AddressCodec, BroadcastClient, UnspentSource};
pub use nep9::{PaymentRequest, RequestedAsset};
pub use transaction_service::{SubmittedTransaction, TokenTransfer, TransactionService};
