use alloy_primitives::Address;
use thiserror::Error;

/// Errors from registry construction and signer replacement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The signer list is empty.
    #[error("signer list cannot be empty")]
    EmptySigners,

    /// An identity would occur more than once in the sequence.
    #[error("duplicate signer {0}")]
    DuplicateSigner(Address),

    /// The threshold exceeds the number of signers.
    #[error("invalid threshold {threshold}: exceeds total signers {total_signers}")]
    InvalidThreshold { threshold: u8, total_signers: usize },

    /// Replacement addressed a slot beyond the sequence.
    #[error("position {position} out of bounds (len: {len})")]
    PositionOutOfBounds { position: usize, len: usize },

    /// Replacement caller is not the current occupant of the slot.
    #[error("caller is not the signer at position {position}")]
    Unauthorized { position: usize },

    /// Replacement request from an account that holds no slot at all.
    #[error("caller {0} is not a registered signer")]
    NotASigner(Address),
}
