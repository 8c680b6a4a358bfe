//! Approval signature encoding.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::SignatureError;

/// Byte length of an encoded approval signature.
pub const SIGNATURE_LEN: usize = 65;

/// A recoverable ECDSA signature over a call digest.
///
/// Encoded as 65 bytes `r || s || v` with the recovery byte last, the
/// encoding wallets emit. `v` may be a raw recovery id (0/1) or the
/// wallet-style 27/28; recovery normalizes both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalSignature([u8; SIGNATURE_LEN]);

impl ApprovalSignature {
    /// Wraps a 65-byte encoded signature.
    pub fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes from a byte slice, rejecting anything that is not exactly
    /// 65 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; SIGNATURE_LEN] = data
            .try_into()
            .map_err(|_| SignatureError::MalformedSignature)?;
        Ok(Self(bytes))
    }

    /// The r component (bytes 0-31).
    pub fn r(&self) -> &[u8; 32] {
        self.0[..32]
            .try_into()
            .expect("signature[..32] is always 32 bytes")
    }

    /// The s component (bytes 32-63).
    pub fn s(&self) -> &[u8; 32] {
        self.0[32..64]
            .try_into()
            .expect("signature[32..64] is always 32 bytes")
    }

    /// The recovery byte (byte 64).
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// The compact body `r || s` without the recovery byte.
    pub fn compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&self.0[..64]);
        compact
    }

    /// The full 65-byte encoding.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl BorshSerialize for ApprovalSignature {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.0)
    }
}

impl BorshDeserialize for ApprovalSignature {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut bytes = [0u8; SIGNATURE_LEN];
        reader.read_exact(&mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sig() -> ApprovalSignature {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&[0xAA; 32]); // r
        bytes[32..64].copy_from_slice(&[0xBB; 32]); // s
        bytes[64] = 27;
        ApprovalSignature::new(bytes)
    }

    #[test]
    fn test_signature_components() {
        let sig = make_sig();
        assert_eq!(sig.r(), &[0xAA; 32]);
        assert_eq!(sig.s(), &[0xBB; 32]);
        assert_eq!(sig.v(), 27);

        let compact = sig.compact();
        assert_eq!(&compact[..32], &[0xAA; 32]);
        assert_eq!(&compact[32..], &[0xBB; 32]);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert_eq!(
            ApprovalSignature::from_bytes(&[0u8; 64]),
            Err(SignatureError::MalformedSignature)
        );
        assert_eq!(
            ApprovalSignature::from_bytes(&[0u8; 66]),
            Err(SignatureError::MalformedSignature)
        );
        assert!(ApprovalSignature::from_bytes(&[0u8; 65]).is_ok());
    }

    #[test]
    fn test_signature_borsh_roundtrip() {
        let sig = make_sig();
        let encoded = borsh::to_vec(&sig).unwrap();
        assert_eq!(encoded.len(), SIGNATURE_LEN);
        let decoded: ApprovalSignature = borsh::from_slice(&encoded).unwrap();
        assert_eq!(sig, decoded);
    }
}
