use crate::codec::MAX_PREFIXED_LEN;
use crate::errors::{WalletError, WalletResult};

/// Append-only byte buffer with NEO serialization helpers
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a one-byte element count, rejecting counts the prefix cannot carry
    pub fn write_count(&mut self, field: &str, count: usize) -> WalletResult<()> {
        match u8::try_from(count) {
            Ok(byte) if count <= MAX_PREFIXED_LEN => {
                self.write_u8(byte);
                Ok(())
            }
            _ => Err(WalletError::length_overflow(field, count, MAX_PREFIXED_LEN)),
        }
    }

    /// Write a length-prefixed byte string
    pub fn write_var_bytes(&mut self, field: &str, bytes: &[u8]) -> WalletResult<()> {
        self.write_count(field, bytes.len())?;
        self.write_bytes(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
