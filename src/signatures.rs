multiversx_sc::imports!();

use crate::types::Hash32;

const DOMAIN_TAG: &[u8] = b"GuildDao";
pub const DELEGATION_TAG: &[u8] = b"Delegation";
pub const BALLOT_TAG: &[u8] = b"Ballot";

/// Off-chain signed messages: ed25519 over a digest bound to the DAO name,
/// the chain id recorded at deploy and this contract's address.
#[multiversx_sc::module]
pub trait SignaturesModule: crate::config::ConfigModule + crate::events::EventsModule {
    /// Checks expiry and nonce, verifies the signature and consumes the nonce.
    /// The signer's address is its ed25519 public key.
    fn consume_signature(
        &self,
        signer: &ManagedAddress,
        nonce: u64,
        expiry: u64,
        message: &ManagedBuffer,
        signature: &ManagedBuffer,
    ) {
        let now = self.blockchain().get_block_timestamp();
        require!(now <= expiry, "Signature expired");
        require!(nonce == self.nonces(signer).get(), "Invalid nonce");

        let digest = self.signed_digest(message);
        self.crypto().verify_ed25519(
            signer.as_managed_buffer(),
            digest.as_managed_buffer(),
            signature,
        );

        self.nonces(signer).set(nonce + 1);
    }

    #[view(getDomainSeparator)]
    fn domain_separator(&self) -> Hash32<Self::Api> {
        let mut domain = ManagedBuffer::new_from_bytes(DOMAIN_TAG);
        domain.append(&self.dao_name().get());
        domain.append(&self.chain_id().get());
        domain.append(self.blockchain().get_sc_address().as_managed_buffer());
        self.crypto().keccak256(&domain)
    }

    #[view(getSignedDigest)]
    fn signed_digest(&self, message: &ManagedBuffer) -> Hash32<Self::Api> {
        let mut payload = ManagedBuffer::new();
        payload.append(self.domain_separator().as_managed_buffer());
        payload.append(message);
        self.crypto().keccak256(&payload)
    }

    fn delegation_message(
        &self,
        delegatee: &ManagedAddress,
        nonce: u64,
        expiry: u64,
    ) -> ManagedBuffer {
        let mut message = ManagedBuffer::new_from_bytes(DELEGATION_TAG);
        message.append(delegatee.as_managed_buffer());
        message.append_bytes(&nonce.to_be_bytes());
        message.append_bytes(&expiry.to_be_bytes());
        message
    }

    fn ballot_message(&self, proposal_id: u64, approved: bool, nonce: u64, expiry: u64) -> ManagedBuffer {
        let mut message = ManagedBuffer::new_from_bytes(BALLOT_TAG);
        message.append_bytes(&proposal_id.to_be_bytes());
        message.append_bytes(&[approved as u8]);
        message.append_bytes(&nonce.to_be_bytes());
        message.append_bytes(&expiry.to_be_bytes());
        message
    }

    #[view(getNonce)]
    #[storage_mapper("nonces")]
    fn nonces(&self, signer: &ManagedAddress) -> SingleValueMapper<u64>;
}
