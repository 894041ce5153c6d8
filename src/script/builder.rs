use serde::{Deserialize, Serialize};

use crate::data_structures::UInt160;
use crate::errors::{WalletError, WalletResult};
use crate::script::opcode::OpCode;

/// Argument passed to a contract method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ContractParameter {
    Integer(i64),
    Boolean(bool),
    Hash160(UInt160),
    ByteArray(Vec<u8>),
    String(String),
    Array(Vec<ContractParameter>),
}

/// Minimal two's-complement little-endian encoding used by the VM for integers
pub fn encode_integer(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let mut bytes = value.to_le_bytes().to_vec();
    while bytes.len() > 1 {
        let last = bytes[bytes.len() - 1];
        let sign_of_previous = bytes[bytes.len() - 2] & 0x80;
        let redundant = (last == 0x00 && sign_of_previous == 0)
            || (last == 0xff && sign_of_previous != 0);
        if !redundant {
            break;
        }
        bytes.pop();
    }
    bytes
}

/// Incremental builder for invocation scripts
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, op: OpCode) -> &mut Self {
        self.bytes.push(op.byte());
        self
    }

    pub fn push_integer(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => self.emit(OpCode::PushM1),
            0 => self.emit(OpCode::Push0),
            16 => self.emit(OpCode::Push16),
            1..=15 => {
                self.bytes.push(OpCode::Push1.byte() + (value as u8 - 1));
                self
            }
            _ => {
                let encoded = encode_integer(value);
                self.push_small_data(&encoded)
            }
        }
    }

    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.emit(OpCode::Push1)
        } else {
            self.emit(OpCode::Push0)
        }
    }

    /// Push raw bytes with the shortest length opcode that fits
    pub fn push_bytes(&mut self, data: &[u8]) -> WalletResult<&mut Self> {
        let len = data.len();
        if len <= OpCode::MAX_PUSH_BYTES {
            return Ok(self.push_small_data(data));
        }
        if len <= u8::MAX as usize {
            self.emit(OpCode::PushData1);
            self.bytes.push(len as u8);
        } else if len <= u16::MAX as usize {
            self.emit(OpCode::PushData2);
            self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            let len = u32::try_from(len)
                .map_err(|_| WalletError::length_overflow("script push", len, u32::MAX as usize))?;
            self.emit(OpCode::PushData4);
            self.bytes.extend_from_slice(&len.to_le_bytes());
        }
        self.bytes.extend_from_slice(data);
        Ok(self)
    }

    // Data of at most 75 bytes is prefixed by its length alone
    fn push_small_data(&mut self, data: &[u8]) -> &mut Self {
        self.bytes.push(data.len() as u8);
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn push_hash160(&mut self, hash: &UInt160) -> &mut Self {
        self.push_small_data(hash.as_wire_bytes())
    }

    pub fn push_string(&mut self, value: &str) -> WalletResult<&mut Self> {
        self.push_bytes(value.as_bytes())
    }

    pub fn push_param(&mut self, param: &ContractParameter) -> WalletResult<&mut Self> {
        match param {
            ContractParameter::Integer(value) => Ok(self.push_integer(*value)),
            ContractParameter::Boolean(value) => Ok(self.push_bool(*value)),
            ContractParameter::Hash160(hash) => Ok(self.push_hash160(hash)),
            ContractParameter::ByteArray(bytes) => self.push_bytes(bytes),
            ContractParameter::String(value) => self.push_string(value),
            ContractParameter::Array(items) => self.push_array(items),
        }
    }

    /// Push items last-to-first, then the count and `PACK`, so the VM packs them in order
    pub fn push_array(&mut self, items: &[ContractParameter]) -> WalletResult<&mut Self> {
        for item in items.iter().rev() {
            self.push_param(item)?;
        }
        let count = i64::try_from(items.len())
            .map_err(|_| WalletError::length_overflow("argument array", items.len(), i64::MAX as usize))?;
        self.push_integer(count);
        Ok(self.emit(OpCode::Pack))
    }

    /// Call `operation` on the contract at `script_hash` with `args` in call order
    pub fn push_contract_invoke(
        &mut self,
        script_hash: &UInt160,
        operation: &str,
        args: &[ContractParameter],
        use_tail_call: bool,
    ) -> WalletResult<&mut Self> {
        self.push_array(args)?;
        self.push_string(operation)?;
        self.emit(if use_tail_call {
            OpCode::TailCall
        } else {
            OpCode::AppCall
        });
        self.bytes.extend_from_slice(script_hash.as_wire_bytes());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Script for a token `transfer(from, to, amount)` call; `amount` is in token base units
pub fn nep5_transfer_script(
    token: &UInt160,
    from: &UInt160,
    to: &UInt160,
    amount: i64,
) -> WalletResult<Vec<u8>> {
    if amount <= 0 {
        return Err(WalletError::InvalidAmount(format!(
            "token transfer amount must be positive, got {amount}"
        )));
    }
    let mut builder = ScriptBuilder::new();
    builder.push_contract_invoke(
        token,
        "transfer",
        &[
            ContractParameter::Hash160(*from),
            ContractParameter::Hash160(*to),
            ContractParameter::Integer(amount),
        ],
        false,
    )?;
    Ok(builder.into_bytes())
}
