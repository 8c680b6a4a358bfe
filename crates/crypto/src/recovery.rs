//! Signer identity recovery.

use alloy_primitives::{keccak256, Address, B256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SECP256K1,
};

use crate::{errors::SignatureError, signature::ApprovalSignature};

/// Recovers the identity that produced `signature` over `digest`.
///
/// Deterministic and side-effect free: the same `(digest, signature)`
/// pair always yields the same identity, and no state is consulted
/// beyond the two inputs. The public key is recovered from the signature
/// itself, so it never needs to be supplied separately.
pub fn recover_signer(
    digest: &B256,
    signature: &ApprovalSignature,
) -> Result<Address, SignatureError> {
    let recovery_id = RecoveryId::from_i32(normalize_v(signature.v())? as i32)
        .map_err(|_| SignatureError::InvalidRecoveryId(signature.v()))?;

    let recoverable_sig = RecoverableSignature::from_compact(&signature.compact(), recovery_id)
        .map_err(|_| SignatureError::MalformedSignature)?;

    let message = Message::from_digest_slice(digest.as_slice())
        .map_err(|_| SignatureError::MalformedSignature)?;

    let pubkey = SECP256K1
        .recover_ecdsa(&message, &recoverable_sig)
        .map_err(|_| SignatureError::BadRecovery)?;

    Ok(signer_address(&pubkey))
}

/// Derives the signer identity for a public key: the last 20 bytes of
/// the keccak256 of the uncompressed key (without the 0x04 prefix byte).
pub fn signer_address(pubkey: &PublicKey) -> Address {
    let uncompressed = pubkey.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}

/// Maps the recovery byte to a raw recovery id, accepting both raw (0/1)
/// and wallet-style (27/28) encodings.
fn normalize_v(v: u8) -> Result<u8, SignatureError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - 27),
        other => Err(SignatureError::InvalidRecoveryId(other)),
    }
}
