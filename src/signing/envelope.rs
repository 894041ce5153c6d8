//! Witness construction and final payload assembly
//!
//! Signing never touches the unsigned bytes; composition copies them into a
//! new buffer followed by a single-signature witness block.

use zeroize::Zeroizing;

use crate::{
    codec::BinaryWriter,
    key_management::{verify_signature, Account, SIGNATURE_LEN},
    script::{verification_script, COMPRESSED_PUBLIC_KEY_LEN},
    signing::models::{
        payload::{SignedPayload, UnsignedPayload, Witness},
        types::{
            get_supported_version, PrepareTransactionForSigningResult, SignedTransactionResult,
        },
    },
    WalletError, WalletResult,
};

/// `PUSHBYTES64 <signature>`
pub fn signature_invocation_script(signature: &[u8; SIGNATURE_LEN]) -> Vec<u8> {
    let mut script = Vec::with_capacity(SIGNATURE_LEN + 1);
    script.push(SIGNATURE_LEN as u8);
    script.extend_from_slice(signature);
    script
}

pub fn single_signature_witness(
    signature: &[u8; SIGNATURE_LEN],
    public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN],
) -> Witness {
    Witness::new(
        signature_invocation_script(signature),
        verification_script(public_key),
    )
}

/// Append a one-entry witness block to a copy of the unsigned bytes
pub fn compose(unsigned: &UnsignedPayload, witness: &Witness) -> WalletResult<SignedPayload> {
    let mut writer = BinaryWriter::with_capacity(
        unsigned.len() + 3 + witness.invocation_script.len() + witness.verification_script.len(),
    );
    writer.write_bytes(unsigned.as_bytes());
    writer.write_count("witnesses", 1)?;
    witness.encode(&mut writer)?;
    Ok(SignedPayload::new(writer.into_bytes(), unsigned.txid()))
}

pub fn sign_payload(unsigned: &UnsignedPayload, account: &Account) -> WalletResult<SignedPayload> {
    let signature = account.sign(unsigned.as_bytes())?;
    let witness = single_signature_witness(&signature, account.public_key());
    let signed = compose(unsigned, &witness)?;
    tracing::debug!(
        txid = %signed.txid(),
        signer = account.address(),
        bytes = signed.len(),
        "Signed payload"
    );
    Ok(signed)
}

/// Sign with raw key bytes; anything that is not a valid 32-byte scalar is a signing error
pub fn sign_with_private_key(
    unsigned: &UnsignedPayload,
    private_key: &[u8],
) -> WalletResult<SignedPayload> {
    let key = Zeroizing::new(private_key.to_vec());
    let account = Account::from_private_key_bytes(&key)?;
    sign_payload(unsigned, &account)
}

/// Sign a prepared hand-off, checking the account and txid match what was prepared
pub fn sign_prepared(
    request: &PrepareTransactionForSigningResult,
    account: &Account,
) -> WalletResult<SignedTransactionResult> {
    if account.script_hash() != request.info.sender {
        return Err(WalletError::SigningError(format!(
            "account {} is not the prepared sender {}",
            account.script_hash(),
            request.info.sender
        )));
    }
    let unsigned = request.info.transaction.serialize()?;
    if unsigned.txid() != request.txid {
        return Err(WalletError::SigningError(format!(
            "prepared txid {} does not match transaction {}",
            request.txid,
            unsigned.txid()
        )));
    }

    let signature = account.sign(unsigned.as_bytes())?;
    if !verify_signature(account.public_key(), unsigned.as_bytes(), &signature) {
        return Err(WalletError::SigningError(
            "signature failed verification".to_string(),
        ));
    }
    let witness = single_signature_witness(&signature, account.public_key());
    let signed_payload = compose(&unsigned, &witness)?;

    tracing::info!(txid = %signed_payload.txid(), "Signed prepared transaction");

    Ok(SignedTransactionResult {
        version: get_supported_version(),
        request: request.clone(),
        witness,
        signed_payload,
    })
}
