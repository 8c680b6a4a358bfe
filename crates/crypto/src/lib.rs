//! Signature primitives for gateway approvals.
//!
//! Provides the recoverable ECDSA signature encoding used by approval
//! sets, the call digest that signatures commit to, and signer identity
//! recovery.

mod digest;
mod errors;
mod recovery;
mod signature;

pub use digest::call_digest;
pub use errors::SignatureError;
pub use recovery::{recover_signer, signer_address};
pub use signature::{ApprovalSignature, SIGNATURE_LEN};
