multiversx_sc::imports!();

use crate::types::{Proposal, ProposalState};

/// Proposal records and per-member vote bookkeeping, shared by the lifecycle,
/// executor and ragequit modules.
#[multiversx_sc::module]
pub trait StorageModule {
    fn proposal_state(&self, id: u64) -> ProposalState {
        if id == 0 || self.proposals(id).is_empty() {
            return ProposalState::Unborn;
        }
        let now = self.blockchain().get_block_timestamp();
        self.proposals(id).get().state_at(now)
    }

    /// Cancelled or processed.
    fn is_resolved(&self, id: u64) -> bool {
        if id == 0 || self.proposals(id).is_empty() {
            return true;
        }
        self.proposals(id).get().flags.is_resolved()
    }

    /// Moves the resolution cursor forward over resolved proposals, never past
    /// `limit`, and returns it.
    fn advance_resolved_through(&self, limit: u64) -> u64 {
        let mut cursor = self.resolved_through().get();
        while cursor < limit && self.is_resolved(cursor + 1) {
            cursor += 1;
        }
        self.resolved_through().set(cursor);
        cursor
    }

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[view(getLatestSponsoredProposalId)]
    #[storage_mapper("latestSponsoredProposalId")]
    fn latest_sponsored_proposal_id(&self) -> SingleValueMapper<u64>;

    /// Every id up to and including this one is resolved.
    #[view(getResolvedThrough)]
    #[storage_mapper("resolvedThrough")]
    fn resolved_through(&self) -> SingleValueMapper<u64>;

    #[view(hasVoted)]
    #[storage_mapper("memberVoted")]
    fn member_voted(&self, proposal_id: u64, member: &ManagedAddress) -> SingleValueMapper<bool>;

    #[view(getHighestYesVote)]
    #[storage_mapper("highestYesVote")]
    fn highest_yes_vote(&self, member: &ManagedAddress) -> SingleValueMapper<u64>;
}
