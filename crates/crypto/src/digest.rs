use alloy_primitives::{keccak256, B256};

/// Computes the digest an approval signature commits to.
///
/// The payload is opaque to the gateway; the digest is a plain keccak256
/// over its bytes, nothing else is mixed in.
pub fn call_digest(payload: &[u8]) -> B256 {
    keccak256(payload)
}
