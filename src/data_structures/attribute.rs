//! Transaction attributes
//!
//! Each attribute is a usage byte followed by its payload. Script hashes are
//! fixed at 20 bytes; remarks and descriptions carry a length prefix.

use serde::{Deserialize, Serialize};

use crate::codec::{BinaryReader, BinaryWriter};
use crate::data_structures::hash::UInt160;
use crate::errors::{WalletError, WalletResult};

/// Usage byte of a script-hash attribute
pub const USAGE_SCRIPT: u8 = 0x20;
/// Usage byte of a description attribute
pub const USAGE_DESCRIPTION: u8 = 0x90;
/// Usage byte of the first remark class; classes run to `0xff`
pub const USAGE_REMARK: u8 = 0xf0;
/// Highest remark class
pub const MAX_REMARK_CLASS: u8 = 0x0f;

/// Optional metadata attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum TransactionAttribute {
    /// Free text; `class` selects one of the sixteen remark usages
    Remark { class: u8, text: String },
    /// Additional script hash that must witness the transaction
    ScriptHash(UInt160),
    /// Raw bytes decoded from a hex description
    DescriptionHex(Vec<u8>),
}

impl TransactionAttribute {
    /// Remark in the default class
    pub fn remark(text: impl Into<String>) -> Self {
        TransactionAttribute::Remark {
            class: 0,
            text: text.into(),
        }
    }

    pub fn description_hex(hex_str: &str) -> WalletResult<Self> {
        Ok(TransactionAttribute::DescriptionHex(
            crate::hex_utils::decode_hex(hex_str)?,
        ))
    }

    pub fn usage(&self) -> WalletResult<u8> {
        match self {
            TransactionAttribute::Remark { class, .. } if *class <= MAX_REMARK_CLASS => {
                Ok(USAGE_REMARK + class)
            }
            TransactionAttribute::Remark { class, .. } => Err(WalletError::EncodingError(
                format!("remark class {class} exceeds {MAX_REMARK_CLASS}"),
            )),
            TransactionAttribute::ScriptHash(_) => Ok(USAGE_SCRIPT),
            TransactionAttribute::DescriptionHex(_) => Ok(USAGE_DESCRIPTION),
        }
    }

    fn payload(&self) -> &[u8] {
        match self {
            TransactionAttribute::Remark { text, .. } => text.as_bytes(),
            TransactionAttribute::ScriptHash(hash) => hash.as_wire_bytes(),
            TransactionAttribute::DescriptionHex(bytes) => bytes,
        }
    }

    /// Attributes without payload are dropped from the block
    pub fn has_payload(&self) -> bool {
        !self.payload().is_empty()
    }

    pub fn encode(&self, writer: &mut BinaryWriter) -> WalletResult<()> {
        writer.write_u8(self.usage()?);
        match self {
            TransactionAttribute::ScriptHash(hash) => {
                writer.write_bytes(hash.as_wire_bytes());
                Ok(())
            }
            _ => writer.write_var_bytes("attribute payload", self.payload()),
        }
    }

    pub fn decode(reader: &mut BinaryReader<'_>) -> WalletResult<Self> {
        let usage = reader.read_u8("attribute usage")?;
        match usage {
            USAGE_SCRIPT => Ok(TransactionAttribute::ScriptHash(UInt160::from_wire_bytes(
                reader.read_array("script hash attribute")?,
            ))),
            USAGE_DESCRIPTION => Ok(TransactionAttribute::DescriptionHex(
                reader.read_var_bytes("description attribute")?.to_vec(),
            )),
            u if u >= USAGE_REMARK => {
                let bytes = reader.read_var_bytes("remark attribute")?;
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| WalletError::DecodingError(format!("remark is not UTF-8: {e}")))?;
                Ok(TransactionAttribute::Remark {
                    class: u - USAGE_REMARK,
                    text,
                })
            }
            other => Err(WalletError::DecodingError(format!(
                "unsupported attribute usage 0x{other:02x}"
            ))),
        }
    }
}

/// Write the attribute block: count, then each attribute that has a payload
pub fn encode_attributes(
    writer: &mut BinaryWriter,
    attributes: &[TransactionAttribute],
) -> WalletResult<usize> {
    let emitted: Vec<&TransactionAttribute> =
        attributes.iter().filter(|a| a.has_payload()).collect();
    writer.write_count("attributes", emitted.len())?;
    for attribute in &emitted {
        attribute.encode(writer)?;
    }
    Ok(emitted.len())
}

pub fn decode_attributes(reader: &mut BinaryReader<'_>) -> WalletResult<Vec<TransactionAttribute>> {
    let count = reader.read_count("attributes", 2)?;
    (0..count).map(|_| TransactionAttribute::decode(reader)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remark_encoding() {
        let mut writer = BinaryWriter::new();
        TransactionAttribute::remark("O3XSEND").encode(&mut writer).unwrap();
        let mut expected = vec![0xf0, 0x07];
        expected.extend_from_slice(b"O3XSEND");
        assert_eq!(writer.into_bytes(), expected);
    }

    #[test]
    fn test_remark_class_selects_usage() {
        let attribute = TransactionAttribute::Remark {
            class: 3,
            text: "x".into(),
        };
        assert_eq!(attribute.usage().unwrap(), 0xf3);
        let invalid = TransactionAttribute::Remark {
            class: 16,
            text: "x".into(),
        };
        assert!(matches!(invalid.usage(), Err(WalletError::EncodingError(_))));
    }

    #[test]
    fn test_script_hash_has_no_length_prefix() {
        let mut writer = BinaryWriter::new();
        TransactionAttribute::ScriptHash(UInt160::from_wire_bytes([0xaa; 20]))
            .encode(&mut writer)
            .unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 21);
        assert_eq!(bytes[0], 0x20);
    }

    #[test]
    fn test_empty_attributes_are_skipped_and_not_counted() {
        let attributes = vec![
            TransactionAttribute::remark(""),
            TransactionAttribute::description_hex("cafe").unwrap(),
            TransactionAttribute::DescriptionHex(vec![]),
        ];
        let mut writer = BinaryWriter::new();
        let emitted = encode_attributes(&mut writer, &attributes).unwrap();
        assert_eq!(emitted, 1);
        assert_eq!(writer.into_bytes(), vec![0x01, 0x90, 0x02, 0xca, 0xfe]);
    }

    #[test]
    fn test_too_many_attributes() {
        let attributes = vec![TransactionAttribute::remark("a"); 256];
        let mut writer = BinaryWriter::new();
        assert!(matches!(
            encode_attributes(&mut writer, &attributes),
            Err(WalletError::EncodingError(_))
        ));
    }

    #[test]
    fn test_oversized_payload() {
        let attribute = TransactionAttribute::remark("x".repeat(256));
        let mut writer = BinaryWriter::new();
        assert!(attribute.encode(&mut writer).is_err());
    }

    #[test]
    fn test_decode_recovers_block() {
        let attributes = vec![
            TransactionAttribute::ScriptHash(UInt160::from_wire_bytes([7; 20])),
            TransactionAttribute::Remark {
                class: 15,
                text: "hello".into(),
            },
            TransactionAttribute::DescriptionHex(vec![1, 2, 3]),
        ];
        let mut writer = BinaryWriter::new();
        encode_attributes(&mut writer, &attributes).unwrap();
        let bytes = writer.into_bytes();
        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(decode_attributes(&mut reader).unwrap(), attributes);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_decode_unknown_usage() {
        let mut reader = BinaryReader::new(&[0x01, 0x30, 0x00]);
        assert!(matches!(
            decode_attributes(&mut reader),
            Err(WalletError::DecodingError(_))
        ));
    }
}
