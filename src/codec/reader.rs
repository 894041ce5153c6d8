use crate::codec::MAX_PREFIXED_LEN;
use crate::errors::{WalletError, WalletResult};

/// Cursor over a byte slice mirroring [`super::BinaryWriter`]
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, field: &str, len: usize) -> WalletResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(WalletError::unexpected_eof(field));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self, field: &str) -> WalletResult<[u8; N]> {
        let slice = self.read_bytes(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &str) -> WalletResult<u8> {
        Ok(self.read_array::<1>(field)?[0])
    }

    pub fn read_u16_le(&mut self, field: &str) -> WalletResult<u16> {
        Ok(u16::from_le_bytes(self.read_array(field)?))
    }

    pub fn read_u64_le(&mut self, field: &str) -> WalletResult<u64> {
        Ok(u64::from_le_bytes(self.read_array(field)?))
    }

    /// Read a one-byte count and make sure the remaining data could possibly hold it
    pub fn read_count(&mut self, field: &str, min_item_len: usize) -> WalletResult<usize> {
        let count = self.read_u8(field)? as usize;
        if count > MAX_PREFIXED_LEN {
            return Err(WalletError::DecodingError(format!(
                "{field} prefix 0x{count:02x} is not a single-byte count"
            )));
        }
        if count.saturating_mul(min_item_len) > self.remaining() {
            return Err(WalletError::DecodingError(format!(
                "{field} count {count} exceeds remaining data"
            )));
        }
        Ok(count)
    }

    pub fn read_var_bytes(&mut self, field: &str) -> WalletResult<&'a [u8]> {
        let len = self.read_count(field, 1)?;
        self.read_bytes(field, len)
    }
}
