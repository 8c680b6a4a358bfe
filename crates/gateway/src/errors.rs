use alloy_primitives::Address;
use tessera_registry::RegistryError;
use thiserror::Error;

use crate::resource::ResourceError;

/// Rejections from approval verification.
///
/// Any one of these fails the entire invocation; verification never
/// mutates state, so there is nothing to roll back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// Fewer valid, unique, eligible approvals than the threshold requires.
    #[error("insufficient signatures: provided {provided}, required {required}")]
    InsufficientSignatures { provided: usize, required: usize },

    /// Malformed signature or unrecoverable identity.
    #[error("invalid signature at index {index}")]
    InvalidSignature { index: usize },

    /// Recovered identity is not in the current signer set.
    #[error("unknown signer {0}")]
    UnknownSigner(Address),

    /// A recovered identity already counted earlier in this approval set.
    #[error("duplicate signature from {0}")]
    DuplicateSignature(Address),

    /// The invoking account supplied its own approval.
    #[error("caller {0} may not supply its own signature")]
    CallerIsSigner(Address),
}

/// Errors surfaced by the gateway entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Approval verification rejected the invocation.
    #[error(transparent)]
    Approval(#[from] ApprovalError),

    /// Registry construction or signer replacement failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The controlled resource rejected the forwarded call after approval
    /// succeeded; the reason is propagated unchanged.
    #[error("forwarding failed: {0}")]
    Forwarding(#[source] ResourceError),
}
