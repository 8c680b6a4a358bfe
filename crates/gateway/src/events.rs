//! Append-only audit records.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use tessera_registry::SignerReplaced;

/// Audit record appended after each successful forward.
///
/// Write-once: records are never mutated after they enter the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Called {
    /// Identity that submitted the invocation.
    pub caller: Address,
    /// The forwarded call payload.
    pub data: Bytes,
    /// Return data captured from the controlled resource.
    pub returndata: Bytes,
}

/// Entry in the gateway's append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayEvent {
    /// A call was approved and forwarded.
    Called(Called),
    /// A signer rotated its own slot.
    SignerReplaced(SignerReplaced),
}
