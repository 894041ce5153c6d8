//! Contract invocation scripts
//!
//! Builds the byte scripts embedded in invocation transactions and the
//! single-signature verification script used by witnesses.

pub mod builder;
pub mod opcode;

pub use builder::{encode_integer, nep5_transfer_script, ContractParameter, ScriptBuilder};
pub use opcode::OpCode;

/// Length of a compressed secp256r1 public key
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// `PUSHBYTES33 <pubkey> CHECKSIG`
pub fn verification_script(public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN]) -> Vec<u8> {
    let mut script = Vec::with_capacity(COMPRESSED_PUBLIC_KEY_LEN + 2);
    script.push(COMPRESSED_PUBLIC_KEY_LEN as u8);
    script.extend_from_slice(public_key);
    script.push(OpCode::CheckSig.byte());
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_script_layout() {
        let script = verification_script(&[0x02; 33]);
        assert_eq!(script.len(), 35);
        assert_eq!(script[0], 0x21);
        assert_eq!(script[34], 0xac);
    }
}
