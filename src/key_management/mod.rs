//! Key management for NEO accounts
//!
//! Private keys, WIF import/export, verification scripts, script hashes and
//! Base58Check addresses.

pub mod account;
pub mod address;

pub use account::{verify_signature, Account, PRIVATE_KEY_LEN, SIGNATURE_LEN};
pub use address::{
    script_hash_from_script, AddressCodec, NeoAddressCodec, DEFAULT_ADDRESS_VERSION,
};
