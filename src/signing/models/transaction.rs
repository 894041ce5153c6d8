use serde::{Deserialize, Serialize};

use crate::{
    codec::{BinaryReader, BinaryWriter},
    data_structures::{
        attribute::{decode_attributes, encode_attributes},
        OutputReference, TransactionAttribute, TransactionOutput, UInt256,
    },
    signing::models::payload::UnsignedPayload,
    WalletError, WalletResult,
};

/// Version byte written after the type byte for every supported kind
pub const TRANSACTION_VERSION: u8 = 0;

pub const CONTRACT_TYPE: u8 = 0x80;
pub const CLAIM_TYPE: u8 = 0x02;
pub const INVOCATION_TYPE: u8 = 0xd1;

/// Transaction shape together with its type-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    /// Plain asset transfer
    Contract,
    /// GAS claim over spent NEO outputs
    Claim { claims: Vec<OutputReference> },
    /// Contract invocation carrying a VM script
    Invocation {
        #[serde(with = "hex_bytes")]
        script: Vec<u8>,
    },
}

impl TransactionKind {
    pub fn type_byte(&self) -> u8 {
        match self {
            TransactionKind::Contract => CONTRACT_TYPE,
            TransactionKind::Claim { .. } => CLAIM_TYPE,
            TransactionKind::Invocation { .. } => INVOCATION_TYPE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Contract => "contract",
            TransactionKind::Claim { .. } => "claim",
            TransactionKind::Invocation { .. } => "invocation",
        }
    }

    fn write_exclusive_data(&self, writer: &mut BinaryWriter) -> WalletResult<()> {
        match self {
            TransactionKind::Contract => {}
            TransactionKind::Claim { claims } => {
                writer.write_count("claims", claims.len())?;
                for claim in claims {
                    write_reference(writer, claim);
                }
            }
            TransactionKind::Invocation { script } => {
                writer.write_var_bytes("invocation script", script)?;
            }
        }
        Ok(())
    }

    fn read(reader: &mut BinaryReader<'_>) -> WalletResult<Self> {
        let type_byte = reader.read_u8("transaction type")?;
        let version = reader.read_u8("transaction version")?;
        if version != TRANSACTION_VERSION {
            return Err(WalletError::DecodingError(format!(
                "unsupported transaction version {version}"
            )));
        }
        match type_byte {
            CONTRACT_TYPE => Ok(TransactionKind::Contract),
            CLAIM_TYPE => {
                let count = reader.read_count("claims", OutputReference::WIRE_LEN)?;
                let claims = (0..count)
                    .map(|_| read_reference(reader))
                    .collect::<WalletResult<Vec<_>>>()?;
                Ok(TransactionKind::Claim { claims })
            }
            INVOCATION_TYPE => Ok(TransactionKind::Invocation {
                script: reader.read_var_bytes("invocation script")?.to_vec(),
            }),
            other => Err(WalletError::DecodingError(format!(
                "unsupported transaction type 0x{other:02x}"
            ))),
        }
    }
}

/// Everything needed to produce the unsigned bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub kind: TransactionKind,
    pub attributes: Vec<TransactionAttribute>,
    pub inputs: Vec<OutputReference>,
    pub outputs: Vec<TransactionOutput>,
}

impl UnsignedTransaction {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<TransactionAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<OutputReference>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<TransactionOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Pack prefix, attributes, inputs and outputs into the unsigned wire form
    pub fn serialize(&self) -> WalletResult<UnsignedPayload> {
        let mut writer = BinaryWriter::with_capacity(
            64 + self.inputs.len() * OutputReference::WIRE_LEN
                + self.outputs.len() * TransactionOutput::WIRE_LEN,
        );
        writer.write_u8(self.kind.type_byte());
        writer.write_u8(TRANSACTION_VERSION);
        self.kind.write_exclusive_data(&mut writer)?;

        let attribute_count = encode_attributes(&mut writer, &self.attributes)?;

        writer.write_count("inputs", self.inputs.len())?;
        for input in &self.inputs {
            write_reference(&mut writer, input);
        }

        writer.write_count("outputs", self.outputs.len())?;
        for output in &self.outputs {
            output.encode(&mut writer)?;
        }

        tracing::debug!(
            kind = self.kind.name(),
            attributes = attribute_count,
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            bytes = writer.len(),
            "Packed unsigned transaction"
        );
        Ok(UnsignedPayload::from_bytes(writer.into_bytes()))
    }

    pub fn txid(&self) -> WalletResult<UInt256> {
        Ok(self.serialize()?.txid())
    }

    /// Parse the unsigned portion, leaving the reader at the witness block
    pub(crate) fn read(reader: &mut BinaryReader<'_>) -> WalletResult<Self> {
        let kind = TransactionKind::read(reader)?;
        let attributes = decode_attributes(reader)?;
        let input_count = reader.read_count("inputs", OutputReference::WIRE_LEN)?;
        let inputs = (0..input_count)
            .map(|_| read_reference(reader))
            .collect::<WalletResult<Vec<_>>>()?;
        let output_count = reader.read_count("outputs", TransactionOutput::WIRE_LEN)?;
        let outputs = (0..output_count)
            .map(|_| TransactionOutput::decode(reader))
            .collect::<WalletResult<Vec<_>>>()?;
        Ok(Self {
            kind,
            attributes,
            inputs,
            outputs,
        })
    }
}

fn write_reference(writer: &mut BinaryWriter, reference: &OutputReference) {
    writer.write_bytes(reference.txid.as_wire_bytes());
    writer.write_u16_le(reference.index);
}

fn read_reference(reader: &mut BinaryReader<'_>) -> WalletResult<OutputReference> {
    let txid = UInt256::from_wire_bytes(reader.read_array("reference txid")?);
    let index = reader.read_u16_le("reference index")?;
    Ok(OutputReference::new(txid, index))
}

pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        crate::hex_utils::decode_hex(&s).map_err(serde::de::Error::custom)
    }
}
