//! Approval verification and call forwarding.
//!
//! The gateway forwards an opaque call payload to its controlled
//! resource once a threshold of distinct registered signers has approved
//! it. Verification is all-or-nothing and keeps no state between
//! invocations; every call must carry a complete approval set.

mod approval;
mod errors;
mod events;
mod gateway;
mod resource;

pub use approval::verify_approval;
pub use errors::{ApprovalError, GatewayError};
pub use events::{Called, GatewayEvent};
pub use gateway::ForwardingGateway;
pub use resource::{ControlledResource, ResourceError};
