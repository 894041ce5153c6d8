use serde::{Deserialize, Serialize};

use crate::codec::{BinaryReader, BinaryWriter};
use crate::data_structures::{asset::AssetId, fixed8::Fixed8, hash::UInt160, hash::UInt256};
use crate::errors::{WalletError, WalletResult};

/// Output for a transaction, crediting `value` of `asset` to `script_hash`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Asset being transferred
    pub asset: AssetId,
    /// Amount credited
    pub value: Fixed8,
    /// Receiving script hash
    pub script_hash: UInt160,
}

impl TransactionOutput {
    /// 32-byte asset id + 8-byte amount + 20-byte script hash
    pub const WIRE_LEN: usize = UInt256::LEN + 8 + UInt160::LEN;

    pub fn new(asset: AssetId, value: Fixed8, script_hash: UInt160) -> Self {
        Self {
            asset,
            value,
            script_hash,
        }
    }

    pub fn encode(&self, writer: &mut BinaryWriter) -> WalletResult<()> {
        if !self.value.is_positive() {
            return Err(WalletError::AmountOverflow(format!(
                "output value must be positive, got {}",
                self.value
            )));
        }
        writer.write_bytes(self.asset.hash().as_wire_bytes());
        writer.write_bytes(&self.value.to_wire_bytes()?);
        writer.write_bytes(self.script_hash.as_wire_bytes());
        Ok(())
    }

    pub fn decode(reader: &mut BinaryReader<'_>) -> WalletResult<Self> {
        let asset = AssetId::from_hash(UInt256::from_wire_bytes(reader.read_array("output asset")?));
        let value = Fixed8::from_wire_bytes(reader.read_array("output value")?);
        let script_hash = UInt160::from_wire_bytes(reader.read_array("output script hash")?);
        Ok(Self::new(asset, value, script_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_layout() {
        let output = TransactionOutput::new(
            AssetId::Neo,
            Fixed8::from_units(1).unwrap(),
            UInt160::from_wire_bytes([0x33; 20]),
        );
        let mut writer = BinaryWriter::new();
        output.encode(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        assert_eq!(bytes.len(), TransactionOutput::WIRE_LEN);
        // NEO id c56f...7c9b reversed
        assert_eq!(bytes[0], 0x9b);
        assert_eq!(bytes[31], 0xc5);
        assert_eq!(&bytes[32..40], &[0x00, 0xe1, 0xf5, 0x05, 0, 0, 0, 0]);
        assert_eq!(&bytes[40..], &[0x33; 20]);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(TransactionOutput::decode(&mut reader).unwrap(), output);
    }

    #[test]
    fn test_zero_output_rejected() {
        let output = TransactionOutput::new(AssetId::Gas, Fixed8::zero(), UInt160::default());
        let mut writer = BinaryWriter::new();
        assert!(matches!(
            output.encode(&mut writer),
            Err(WalletError::AmountOverflow(_))
        ));
    }
}
