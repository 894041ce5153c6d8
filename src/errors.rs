//! Error types for payload construction and signing
//!
//! Every fallible step of building a transaction surfaces one of these
//! variants. Nothing in the core retries; retry policy belongs to the caller.

use thiserror::Error;

/// Errors raised while selecting inputs, packing, signing or broadcasting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: String, required: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    #[error("Negative change: selected {selected}, requested {requested}")]
    NegativeChange { selected: String, requested: String },

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Nothing to claim")]
    NothingToClaim,

    #[error("Sending the whole GAS balance leaves nothing for the network reserve ({0})")]
    GasReserve(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Collaborator error: {0}")]
    CollaboratorError(String),
}

/// Result alias used across the crate
pub type WalletResult<T> = Result<T, WalletError>;

impl From<hex::FromHexError> for WalletError {
    fn from(err: hex::FromHexError) -> Self {
        WalletError::InvalidHex(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::ConfigurationError(err.to_string())
    }
}

impl WalletError {
    /// Shorthand for a length-prefix overflow on a named field
    pub(crate) fn length_overflow(field: &str, len: usize, max: usize) -> Self {
        WalletError::EncodingError(format!("{field} length {len} exceeds maximum {max}"))
    }

    /// Shorthand for running out of bytes while decoding
    pub(crate) fn unexpected_eof(field: &str) -> Self {
        WalletError::DecodingError(format!("unexpected end of data while reading {field}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_error_conversion() {
        let err: WalletError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, WalletError::InvalidHex(_)));
    }

    #[test]
    fn test_error_display() {
        let err = WalletError::InsufficientBalance {
            available: "1".to_string(),
            required: "2".to_string(),
        };
        assert_eq!(err.to_string(), "Insufficient balance: available 1, required 2");
        assert_eq!(
            WalletError::length_overflow("script", 300, 252).to_string(),
            "Encoding error: script length 300 exceeds maximum 252"
        );
    }
}
