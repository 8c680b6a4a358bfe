//! The controlled-resource seam.

use alloy_primitives::{Address, Bytes};
use thiserror::Error;

/// Rejection reason reported by a controlled resource.
///
/// The resource is opaque to the gateway, so the reason is carried as a
/// plain message and propagated unchanged to the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ResourceError(String);

impl ResourceError {
    /// Wraps a rejection reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The resource whose privileged operations sit behind the gateway.
///
/// The gateway owns exactly one implementation, bound at construction.
/// Implementations must uphold two contracts:
///
/// - only the gateway's identity is accepted as the privileged `caller`;
///   any other caller fails with an ownership error, and
/// - state is left untouched when `execute` returns an error, so a
///   failed invocation has no observable partial effect.
pub trait ControlledResource {
    /// Executes an opaque call payload on behalf of `caller`.
    fn execute(&mut self, caller: Address, payload: &[u8]) -> Result<Bytes, ResourceError>;
}
