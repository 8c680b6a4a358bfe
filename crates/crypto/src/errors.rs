use thiserror::Error;

/// Errors produced while decoding or recovering an approval signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature bytes are not a well-formed `r || s || v` encoding.
    #[error("malformed signature encoding")]
    MalformedSignature,

    /// The trailing recovery byte is not 0, 1, 27 or 28.
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),

    /// No public key is recoverable from the signature over this digest.
    #[error("signature does not recover to a valid key")]
    BadRecovery,
}
