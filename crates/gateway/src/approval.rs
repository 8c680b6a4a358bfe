//! Threshold approval verification.

use std::collections::HashSet;

use alloy_primitives::Address;
use tessera_crypto::{call_digest, recover_signer, ApprovalSignature};
use tessera_registry::SignerRegistry;

use crate::errors::ApprovalError;

/// Verifies a caller-supplied approval set against the registry.
///
/// A registered caller is itself one approval: submitting the
/// invocation endorses it, which is also why the caller's own signature
/// in the set is rejected — it would count the same identity twice.
///
/// Checks run in order and short-circuit on the first failure:
///
/// 1. the submitted signature count, plus the caller's implicit approval
///    when the caller is a registered signer, is lower-bounded by the
///    threshold;
/// 2. each signature, in submission order, must recover to an identity
///    that is not the caller, has not been counted yet, and is a
///    registered signer;
/// 3. the number of distinct counted identities must reach the threshold.
///
/// Reaching `Ok` therefore requires `threshold` distinct registered
/// approvers, the submitting signer included. The duplicate check is
/// identity-based: a re-encoded signature recovering to the same signer
/// still counts once.
///
/// Pure with respect to state: nothing is mutated regardless of outcome,
/// and the registry is only read.
pub fn verify_approval(
    registry: &SignerRegistry,
    payload: &[u8],
    signatures: &[ApprovalSignature],
    caller: Address,
) -> Result<(), ApprovalError> {
    let digest = call_digest(payload);
    let required = registry.threshold() as usize;

    let mut seen: HashSet<Address> = HashSet::with_capacity(signatures.len() + 1);
    if registry.is_member(&caller) {
        seen.insert(caller);
    }

    if signatures.len() + seen.len() < required {
        return Err(ApprovalError::InsufficientSignatures {
            provided: signatures.len() + seen.len(),
            required,
        });
    }

    for (index, signature) in signatures.iter().enumerate() {
        let signer = recover_signer(&digest, signature)
            .map_err(|_| ApprovalError::InvalidSignature { index })?;

        if signer == caller {
            return Err(ApprovalError::CallerIsSigner(signer));
        }
        if seen.contains(&signer) {
            return Err(ApprovalError::DuplicateSignature(signer));
        }
        if !registry.is_member(&signer) {
            return Err(ApprovalError::UnknownSigner(signer));
        }
        seen.insert(signer);
    }

    if seen.len() < required {
        return Err(ApprovalError::InsufficientSignatures {
            provided: seen.len(),
            required,
        });
    }

    Ok(())
}
