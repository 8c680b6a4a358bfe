//! Deterministic signing helpers for exercising approval flows in tests.

use alloy_primitives::{Address, B256};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, SECP256K1};
use tessera_crypto::{call_digest, signer_address, ApprovalSignature};

/// A deterministic secp256k1 keypair with its derived signer identity.
///
/// Seeded construction keeps test scenarios reproducible; the same seed
/// always yields the same identity.
#[derive(Debug, Clone, Copy)]
pub struct TestSigner {
    secret_key: SecretKey,
    address: Address,
}

impl TestSigner {
    /// Derives a keypair from a single seed byte.
    pub fn from_seed(seed: u8) -> Self {
        let secp = Secp256k1::new();
        let mut sk_bytes = [0u8; 32];
        sk_bytes[31] = seed.max(1);
        let secret_key = SecretKey::from_slice(&sk_bytes).expect("valid test secret key");
        let address = signer_address(&PublicKey::from_secret_key(&secp, &secret_key));
        Self {
            secret_key,
            address,
        }
    }

    /// The signer identity this keypair recovers to.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs a digest, emitting the wallet-style encoding (v = 27/28).
    pub fn sign(&self, digest: &B256) -> ApprovalSignature {
        let message = Message::from_digest_slice(digest.as_slice()).expect("digest is 32 bytes");
        let (recovery_id, compact) = SECP256K1
            .sign_ecdsa_recoverable(&message, &self.secret_key)
            .serialize_compact();

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = 27 + recovery_id.to_i32() as u8;
        ApprovalSignature::new(bytes)
    }

    /// Signs the call digest of `payload`.
    pub fn sign_payload(&self, payload: &[u8]) -> ApprovalSignature {
        self.sign(&call_digest(payload))
    }
}
