//! Positional signer sequence with self-service replacement.

use std::num::NonZero;

use alloy_primitives::Address;
use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// The ordered sequence of authorized signers and the approval threshold.
///
/// Positions are meaningful: replacement is addressed by slot, and the
/// sequence length never changes after construction. The threshold is
/// stored as `NonZero<u8>` to rule out a zero threshold at the type
/// level; it never changes either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRegistry {
    /// Identities of all authorized signers, slot-addressed.
    signers: Vec<Address>,
    /// Minimum number of distinct signer approvals required (always >= 1).
    threshold: NonZero<u8>,
}

/// Record emitted when a signer rotates its own slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerReplaced {
    /// The identity that previously occupied the slot.
    pub old_signer: Address,
    /// The identity now occupying the slot.
    pub new_signer: Address,
}

impl SignerRegistry {
    /// Creates a new registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if:
    /// - `EmptySigners`: the signer list is empty
    /// - `DuplicateSigner`: an identity occurs more than once
    /// - `InvalidThreshold`: the threshold exceeds the signer count
    pub fn try_new(signers: Vec<Address>, threshold: NonZero<u8>) -> Result<Self, RegistryError> {
        if signers.is_empty() {
            return Err(RegistryError::EmptySigners);
        }

        for (slot, signer) in signers.iter().enumerate() {
            if signers[..slot].contains(signer) {
                return Err(RegistryError::DuplicateSigner(*signer));
            }
        }

        if threshold.get() as usize > signers.len() {
            return Err(RegistryError::InvalidThreshold {
                threshold: threshold.get(),
                total_signers: signers.len(),
            });
        }

        Ok(Self { signers, threshold })
    }

    /// All signer identities, in slot order.
    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    /// The signer occupying `position`, if any.
    pub fn signer_at(&self, position: usize) -> Option<Address> {
        self.signers.get(position).copied()
    }

    /// Whether `signer` occurs anywhere in the current sequence.
    pub fn is_member(&self, signer: &Address) -> bool {
        self.signers.contains(signer)
    }

    /// The approval threshold.
    pub fn threshold(&self) -> u8 {
        self.threshold.get()
    }

    /// Number of signer slots.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the registry holds no signers. Construction forbids this,
    /// so it only returns true for a default-ish registry deserialized
    /// from elsewhere.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Replaces the signer at `position` with `new_signer`.
    ///
    /// Only the slot's current occupant may rotate it: this is
    /// self-service key rotation, not administration of other signers.
    /// Sequence length and threshold are untouched.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if:
    /// - `PositionOutOfBounds`: `position` is beyond the sequence
    /// - `Unauthorized`: `caller` is not the occupant of `position`
    /// - `DuplicateSigner`: `new_signer` already occupies another slot
    pub fn replace(
        &mut self,
        position: usize,
        new_signer: Address,
        caller: Address,
    ) -> Result<SignerReplaced, RegistryError> {
        let old_signer = self
            .signer_at(position)
            .ok_or(RegistryError::PositionOutOfBounds {
                position,
                len: self.signers.len(),
            })?;

        if old_signer != caller {
            return Err(RegistryError::Unauthorized { position });
        }

        // Re-occupying the same slot with the same identity is fine;
        // landing on another slot's identity is not.
        if self
            .signers
            .iter()
            .enumerate()
            .any(|(slot, signer)| slot != position && *signer == new_signer)
        {
            return Err(RegistryError::DuplicateSigner(new_signer));
        }

        self.signers[position] = new_signer;
        Ok(SignerReplaced {
            old_signer,
            new_signer,
        })
    }

    /// Replaces the caller's own slot with `new_signer`.
    ///
    /// The slot is located from the caller's current position, so a
    /// signer only ever rotates itself.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if:
    /// - `NotASigner`: `caller` holds no slot in the sequence
    /// - `DuplicateSigner`: `new_signer` already occupies another slot
    pub fn replace_self(
        &mut self,
        new_signer: Address,
        caller: Address,
    ) -> Result<SignerReplaced, RegistryError> {
        let position = self
            .signers
            .iter()
            .position(|signer| *signer == caller)
            .ok_or(RegistryError::NotASigner(caller))?;
        self.replace(position, new_signer, caller)
    }
}

impl BorshSerialize for SignerRegistry {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        // Call through the trait: `serde::Serialize` is also in scope.
        BorshSerialize::serialize(&(self.signers.len() as u32), writer)?;
        for signer in &self.signers {
            writer.write_all(signer.as_slice())?;
        }
        BorshSerialize::serialize(&self.threshold.get(), writer)
    }
}

impl BorshDeserialize for SignerRegistry {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let count = u32::deserialize_reader(reader)?;
        let mut signers = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut bytes = [0u8; 20];
            reader.read_exact(&mut bytes)?;
            signers.push(Address::from(bytes));
        }
        let threshold = u8::deserialize_reader(reader)?;
        let threshold = NonZero::new(threshold).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "threshold must be nonzero")
        })?;
        // Route through construction so decoded registries uphold the
        // same invariants as built ones.
        SignerRegistry::try_new(signers, threshold)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl<'a> Arbitrary<'a> for SignerRegistry {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let count = u.int_in_range(1..=20usize)?;
        let mut signers = Vec::with_capacity(count);
        for slot in 0..count {
            let mut bytes = [0u8; 20];
            u.fill_buffer(&mut bytes)?;
            // Slot index in the last byte keeps the sequence duplicate-free.
            bytes[19] = slot as u8;
            signers.push(Address::from(bytes));
        }
        let threshold = u.int_in_range(1..=count as u8)?;
        let threshold = NonZero::new(threshold).expect("threshold is always >= 1");
        Ok(Self { signers, threshold })
    }
}
