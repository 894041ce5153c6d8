use serde::{Deserialize, Serialize};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    data_structures::UInt256,
    hex_utils::HexEncodable,
    signing::{decode::DecodedTransaction, models::transaction::hex_bytes},
    WalletError, WalletResult,
};

/// Packed transaction bytes awaiting a witness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedPayload {
    #[serde(with = "hex_bytes")]
    bytes: Vec<u8>,
}

impl UnsignedPayload {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Double SHA-256 of the unsigned bytes
    pub fn txid(&self) -> UInt256 {
        UInt256::hash_of(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl HexEncodable for UnsignedPayload {
    fn to_hex(&self) -> String {
        self.bytes.to_hex()
    }
}

/// Unsigned bytes followed by the witness block, ready to broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSignedPayload")]
pub struct SignedPayload {
    #[serde(with = "hex_bytes")]
    bytes: Vec<u8>,
    txid: UInt256,
}

#[derive(Deserialize)]
struct RawSignedPayload {
    #[serde(with = "hex_bytes")]
    bytes: Vec<u8>,
    txid: UInt256,
}

impl TryFrom<RawSignedPayload> for SignedPayload {
    type Error = WalletError;

    /// The stored txid must match the bytes, which must carry a witness
    fn try_from(raw: RawSignedPayload) -> Result<Self, Self::Error> {
        let decoded = DecodedTransaction::from_bytes(&raw.bytes)?;
        if !decoded.is_signed() {
            return Err(WalletError::DecodingError(
                "signed payload carries no witness".to_string(),
            ));
        }
        let txid = decoded.txid()?;
        if txid != raw.txid {
            return Err(WalletError::DecodingError(format!(
                "signed payload txid {} does not match its bytes ({txid})",
                raw.txid
            )));
        }
        Ok(Self::new(raw.bytes, txid))
    }
}

impl SignedPayload {
    pub(crate) fn new(bytes: Vec<u8>, txid: UInt256) -> Self {
        Self { bytes, txid }
    }

    /// Id of the transaction; witnesses do not change it
    pub fn txid(&self) -> UInt256 {
        self.txid
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl HexEncodable for SignedPayload {
    fn to_hex(&self) -> String {
        self.bytes.to_hex()
    }
}

/// Invocation (signature) script paired with verification script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    #[serde(with = "hex_bytes")]
    pub invocation_script: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    pub fn encode(&self, writer: &mut BinaryWriter) -> WalletResult<()> {
        writer.write_var_bytes("invocation script", &self.invocation_script)?;
        writer.write_var_bytes("verification script", &self.verification_script)
    }

    pub fn decode(reader: &mut BinaryReader<'_>) -> WalletResult<Self> {
        let invocation_script = reader.read_var_bytes("invocation script")?.to_vec();
        let verification_script = reader.read_var_bytes("verification script")?.to_vec();
        Ok(Self::new(invocation_script, verification_script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_txid_is_double_sha256() {
        let payload = UnsignedPayload::from_bytes(vec![0x80, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(payload.txid(), UInt256::hash_of(&[0x80, 0x00, 0x00, 0x00, 0x00]));
        assert_eq!(payload.to_hex(), "8000000000");
    }

    #[test]
    fn test_witness_encoding() {
        let witness = Witness::new(vec![0x40; 3], vec![0xac]);
        let mut writer = BinaryWriter::new();
        witness.encode(&mut writer).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0x03, 0x40, 0x40, 0x40, 0x01, 0xac]);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(Witness::decode(&mut reader).unwrap(), witness);
    }

    #[test]
    fn test_signed_payload_json_checks_txid() {
        use crate::data_structures::{AssetId, Fixed8, OutputReference, TransactionOutput, UInt160};
        use crate::key_management::Account;
        use crate::signing::{
            envelope::sign_payload,
            models::transaction::{TransactionKind, UnsignedTransaction},
        };

        let unsigned = UnsignedTransaction::new(TransactionKind::Contract)
            .with_inputs(vec![OutputReference::new(UInt256::from_wire_bytes([3; 32]), 0)])
            .with_outputs(vec![TransactionOutput::new(
                AssetId::Gas,
                Fixed8::from_raw(1),
                UInt160::from_wire_bytes([4; 20]),
            )])
            .serialize()
            .unwrap();
        let signed = sign_payload(&unsigned, &Account::generate()).unwrap();

        let json = serde_json::to_string(&signed).unwrap();
        assert_eq!(serde_json::from_str::<SignedPayload>(&json).unwrap(), signed);

        let forged = json.replace(
            &signed.txid().to_display_hex(),
            &UInt256::from_wire_bytes([9; 32]).to_display_hex(),
        );
        assert!(serde_json::from_str::<SignedPayload>(&forged).is_err());

        let unsigned_json = format!(
            r#"{{"bytes":"{}","txid":"{}"}}"#,
            unsigned.to_hex(),
            unsigned.txid().to_display_hex()
        );
        assert!(serde_json::from_str::<SignedPayload>(&unsigned_json).is_err());
    }

    #[test]
    fn test_payload_json_is_hex() {
        let payload = UnsignedPayload::from_bytes(vec![0xd1, 0x00]);
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"bytes":"d100"}"#
        );
    }
}
