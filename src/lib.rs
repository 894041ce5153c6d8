//! Transaction payload libraries for NEO
//!
//! This crate builds, serializes and signs NEO 2.x transactions for light
//! wallets: UTXO selection, attribute and script encoding, payload packing
//! for contract, claim and invocation transactions, and single-signature
//! witnesses.
//!
//! ## Layout
//!
//! - `codec`, `hex_utils`, `data_structures`: the wire format and its types
//! - `script`: invocation scripts and NEP-5 transfers
//! - `signing`: input selection, payload packing, signing and decoding
//! - `key_management`: accounts, WIF and addresses
//! - `wallet`: async flows over balance and broadcast collaborators
//!
//! Payload construction is synchronous and pure; only the `wallet` flows
//! await their collaborators. The library emits `tracing` events but never
//! installs a subscriber.

pub mod codec;
pub mod config;
pub mod data_structures;
pub mod errors;
pub mod hex_utils;
pub mod key_management;
pub mod script;
pub mod signing;
pub mod validation;
pub mod wallet;

pub use config::TransactionConfig;
pub use data_structures::*;
pub use errors::*;
pub use hex_utils::*;
pub use key_management::*;
pub use signing::*;
pub use validation::*;
pub use wallet::*;
