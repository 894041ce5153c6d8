//! Transaction preparation and signing
//!
//! Preparation selects inputs and packs an [`UnsignedTransaction`] into a
//! versioned hand-off; signing adds a single-signature witness. The two
//! halves only share the JSON form, so they can run on different devices.

pub mod decode;
pub mod envelope;
pub mod models;
pub mod prepare;

pub use decode::DecodedTransaction;
pub use envelope::{compose, sign_payload, sign_prepared, sign_with_private_key};
pub use models::*;
pub use prepare::*;
