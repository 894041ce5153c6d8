//! Core data structures for NEO transaction payloads
//!
//! Amounts, hashes, assets, unspent outputs and attributes shared by the
//! selector, the payload builder and the decoder.

pub mod asset;
pub mod attribute;
pub mod fixed8;
pub mod hash;
pub mod transaction_output;
pub mod unspent_output;

pub use asset::{AssetBalance, AssetId, GAS_ASSET_ID, NEO_ASSET_ID};
pub use attribute::TransactionAttribute;
pub use fixed8::Fixed8;
pub use hash::{UInt160, UInt256};
pub use transaction_output::TransactionOutput;
pub use unspent_output::{Claimable, OutputReference, UnspentOutput};
