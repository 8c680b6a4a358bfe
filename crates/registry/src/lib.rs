//! The ordered signer set and approval threshold for the authorization
//! gateway.

mod errors;
mod registry;

pub use errors::RegistryError;
pub use registry::{SignerRegistry, SignerReplaced};
