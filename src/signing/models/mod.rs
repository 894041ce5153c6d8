pub mod payload;
pub mod transaction;
pub mod types;

pub use payload::{SignedPayload, UnsignedPayload, Witness};
pub use transaction::{TransactionKind, UnsignedTransaction, TRANSACTION_VERSION};
pub use types::{
    get_supported_version, HasVersion, PrepareTransactionForSigningResult,
    SignedTransactionResult, TransactionInfo, TransactionResult,
};
