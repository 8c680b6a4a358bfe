//! Call forwarding behind threshold approval.

use std::num::NonZero;

use alloy_primitives::{Address, Bytes};
use tessera_crypto::ApprovalSignature;
use tessera_registry::SignerRegistry;

use crate::{
    approval::verify_approval,
    errors::GatewayError,
    events::{Called, GatewayEvent},
    resource::ControlledResource,
};

/// Orchestrates approved calls against the controlled resource.
///
/// Owns the signer registry, its own identity, exactly one controlled
/// resource (bound at construction, immutable thereafter) and the
/// append-only event log. Entry points take `&mut self`, so an
/// invocation and a signer replacement can never interleave.
///
/// Stateless between invocations: there is no pending or
/// partial-approval state, every call must carry a complete approval
/// set, and nothing is kept from a failed submission.
#[derive(Debug)]
pub struct ForwardingGateway<R> {
    /// Identity under which forwarded calls reach the resource.
    identity: Address,
    registry: SignerRegistry,
    resource: R,
    events: Vec<GatewayEvent>,
}

impl<R: ControlledResource> ForwardingGateway<R> {
    /// Binds a gateway to its controlled resource with the initial
    /// signer sequence and threshold.
    pub fn new(
        identity: Address,
        signers: Vec<Address>,
        threshold: NonZero<u8>,
        resource: R,
    ) -> Result<Self, GatewayError> {
        let registry = SignerRegistry::try_new(signers, threshold)?;
        Ok(Self {
            identity,
            registry,
            resource,
            events: Vec::new(),
        })
    }

    /// Verifies the approval set and, on success, forwards `payload` to
    /// the controlled resource under the gateway's own identity.
    ///
    /// All-or-nothing: on any rejection — verification or the resource
    /// itself — the registry, the resource and the event log are left
    /// exactly as before the call, and the reason propagates unchanged.
    pub fn invoke(
        &mut self,
        signatures: &[ApprovalSignature],
        payload: &[u8],
        caller: Address,
    ) -> Result<Bytes, GatewayError> {
        verify_approval(&self.registry, payload, signatures, caller)?;

        let returndata = self
            .resource
            .execute(self.identity, payload)
            .map_err(GatewayError::Forwarding)?;

        tracing::debug!(%caller, payload_len = payload.len(), "forwarded approved call");
        self.events.push(GatewayEvent::Called(Called {
            caller,
            data: Bytes::copy_from_slice(payload),
            returndata: returndata.clone(),
        }));

        Ok(returndata)
    }

    /// Rotates the caller's own signer slot to `new_signer`.
    ///
    /// The slot is located from the caller's current position, so a
    /// signer only ever replaces itself.
    pub fn replace_signer(
        &mut self,
        new_signer: Address,
        caller: Address,
    ) -> Result<(), GatewayError> {
        let replaced = self.registry.replace_self(new_signer, caller)?;

        tracing::info!(
            old = %replaced.old_signer,
            new = %replaced.new_signer,
            "signer replaced"
        );
        self.events.push(GatewayEvent::SignerReplaced(replaced));
        Ok(())
    }

    /// The signer occupying `position`, if any.
    pub fn signer_at(&self, position: usize) -> Option<Address> {
        self.registry.signer_at(position)
    }

    /// The current approval threshold.
    pub fn threshold(&self) -> u8 {
        self.registry.threshold()
    }

    /// The gateway's own identity, as seen by the controlled resource.
    pub fn identity(&self) -> Address {
        self.identity
    }

    /// The controlled resource behind the gateway.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// The append-only audit history of successful operations.
    pub fn events(&self) -> &[GatewayEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use tessera_registry::RegistryError;
    use tessera_test_utils::TestSigner;

    use super::*;
    use crate::{
        errors::ApprovalError,
        resource::ResourceError,
    };

    const PAYLOAD: &[u8] = b"privileged op";

    /// Records forwarded payloads; rejects when told to, mutating
    /// nothing on failure.
    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<(Address, Vec<u8>)>,
        reject_next: bool,
    }

    impl ControlledResource for Recorder {
        fn execute(&mut self, caller: Address, payload: &[u8]) -> Result<Bytes, ResourceError> {
            if self.reject_next {
                return Err(ResourceError::new("resource said no"));
            }
            self.calls.push((caller, payload.to_vec()));
            Ok(Bytes::from(payload.len().to_be_bytes().to_vec()))
        }
    }

    fn make_gateway(
        seeds: &[u8],
        threshold: u8,
    ) -> (ForwardingGateway<Recorder>, Vec<TestSigner>) {
        let signers: Vec<TestSigner> = seeds.iter().map(|&s| TestSigner::from_seed(s)).collect();
        let gateway = ForwardingGateway::new(
            Address::with_last_byte(0xEE),
            signers.iter().map(|s| s.address()).collect(),
            NonZero::new(threshold).unwrap(),
            Recorder::default(),
        )
        .unwrap();
        (gateway, signers)
    }

    #[test]
    fn test_invoke_forwards_under_gateway_identity() {
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        let caller = TestSigner::from_seed(9).address();

        let sigs = vec![
            signers[0].sign_payload(PAYLOAD),
            signers[1].sign_payload(PAYLOAD),
        ];
        let returndata = gateway.invoke(&sigs, PAYLOAD, caller).unwrap();

        assert_eq!(returndata, Bytes::from(PAYLOAD.len().to_be_bytes().to_vec()));
        assert_eq!(
            gateway.resource().calls,
            vec![(gateway.identity(), PAYLOAD.to_vec())]
        );
        assert_eq!(
            gateway.events(),
            &[GatewayEvent::Called(Called {
                caller,
                data: Bytes::copy_from_slice(PAYLOAD),
                returndata,
            })]
        );
    }

    #[test]
    fn test_failed_invoke_has_no_partial_effects() {
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        let caller = TestSigner::from_seed(9).address();

        let sigs = vec![signers[0].sign_payload(PAYLOAD)];
        let err = gateway.invoke(&sigs, PAYLOAD, caller).unwrap_err();
        assert_eq!(
            err,
            GatewayError::Approval(ApprovalError::InsufficientSignatures {
                provided: 1,
                required: 2,
            })
        );

        assert!(gateway.resource().calls.is_empty());
        assert!(gateway.events().is_empty());
    }

    #[test]
    fn test_resource_rejection_surfaces_and_emits_nothing() {
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        gateway.resource.reject_next = true;
        let caller = TestSigner::from_seed(9).address();

        let sigs = vec![
            signers[0].sign_payload(PAYLOAD),
            signers[1].sign_payload(PAYLOAD),
        ];
        let err = gateway.invoke(&sigs, PAYLOAD, caller).unwrap_err();

        // Approval succeeded, but the downstream rejection propagates
        // unchanged and no audit record is written.
        assert_eq!(
            err,
            GatewayError::Forwarding(ResourceError::new("resource said no"))
        );
        assert!(gateway.events().is_empty());
    }

    #[test]
    fn test_replace_signer_records_event() {
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        let rotated = TestSigner::from_seed(7);

        gateway
            .replace_signer(rotated.address(), signers[1].address())
            .unwrap();

        assert_eq!(gateway.signer_at(1), Some(rotated.address()));
        assert_eq!(gateway.events().len(), 1);
        assert!(matches!(
            gateway.events()[0],
            GatewayEvent::SignerReplaced(_)
        ));
    }

    #[test]
    fn test_replace_signer_unauthorized_leaves_log_empty() {
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        let attacker = TestSigner::from_seed(9);

        let err = gateway
            .replace_signer(attacker.address(), attacker.address())
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Registry(RegistryError::NotASigner(attacker.address()))
        );
        assert_eq!(gateway.signer_at(1), Some(signers[1].address()));
        assert!(gateway.events().is_empty());
    }

    #[test]
    fn test_rotated_signer_approvals() {
        // After rotation the old key no longer counts and the new one does.
        let (mut gateway, signers) = make_gateway(&[1, 2, 3], 2);
        let caller = TestSigner::from_seed(9).address();
        let rotated = TestSigner::from_seed(7);

        gateway
            .replace_signer(rotated.address(), signers[0].address())
            .unwrap();

        let stale = vec![
            signers[0].sign_payload(PAYLOAD),
            signers[1].sign_payload(PAYLOAD),
        ];
        assert_eq!(
            gateway.invoke(&stale, PAYLOAD, caller).unwrap_err(),
            GatewayError::Approval(ApprovalError::UnknownSigner(signers[0].address()))
        );

        let fresh = vec![
            rotated.sign_payload(PAYLOAD),
            signers[1].sign_payload(PAYLOAD),
        ];
        assert!(gateway.invoke(&fresh, PAYLOAD, caller).is_ok());
    }
}
