multiversx_sc::imports!();

use crate::types::{is_expired, Hash32, Proposal, ProposalFlags, ProposalState};

const PERCENT: u64 = 100;

#[multiversx_sc::module]
pub trait ProposalsModule:
    crate::config::ConfigModule
    + crate::events::EventsModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::shares::SharesModule
    + crate::loot::LootModule
    + crate::storage::StorageModule
    + crate::executor::ExecutorModule
{
    // ========================================================
    // ENDPOINT: submitProposal
    // Members above the sponsor threshold sponsor in the same
    // call; everyone else pays the offering and waits.
    // ========================================================

    #[endpoint(submitProposal)]
    #[payable("EGLD")]
    fn submit_proposal(
        &self,
        payload: ManagedBuffer,
        expiration: u64,
        max_gas: u64,
        details_hash: Hash32<Self::Api>,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let offering = self.call_value().egld_value().clone_value();
        let now = self.blockchain().get_block_timestamp();

        require!(!is_expired(expiration, now), "Proposal already expired");

        let self_sponsor = self.current_votes(&caller) >= self.sponsor_threshold().get();
        if !self_sponsor {
            require!(
                offering >= self.proposal_offering().get(),
                "Offering below proposal offering"
            );
        }

        let proposal_id = self.proposal_count().get() + 1;
        let mut proposal = Proposal {
            id: proposal_id,
            payload_hash: self.crypto().keccak256(&payload),
            details_hash,
            proposer: caller.clone(),
            sponsor: ManagedAddress::zero(),
            voting_starts: 0,
            voting_ends: 0,
            grace_ends: 0,
            expiration,
            max_gas,
            yes_votes: BigUint::zero(),
            no_votes: BigUint::zero(),
            max_total_supply_at_vote: BigUint::zero(),
            flags: ProposalFlags::default(),
        };
        self.proposal_count().set(proposal_id);

        self.proposal_submitted_event(
            proposal_id,
            &caller,
            self_sponsor,
            expiration,
            &proposal.details_hash,
        );

        if self_sponsor {
            self.start_voting(&mut proposal, &caller);
        }
        self.proposals(proposal_id).set(&proposal);

        if offering > 0u64 {
            let treasury = self.treasury().get();
            self.tx().to(&treasury).egld(&offering).transfer();
        }

        proposal_id
    }

    // ========================================================
    // ENDPOINT: sponsorProposal
    // ========================================================

    #[endpoint(sponsorProposal)]
    fn sponsor_proposal(&self, proposal_id: u64) {
        let caller = self.blockchain().get_caller();
        require!(
            self.proposal_state(proposal_id) == ProposalState::Submitted,
            "Proposal is not awaiting a sponsor"
        );

        let mut proposal = self.proposals(proposal_id).get();
        let now = self.blockchain().get_block_timestamp();
        require!(!proposal.is_expired(now), "Proposal expired");
        require!(
            self.current_votes(&caller) >= self.sponsor_threshold().get(),
            "Below sponsor threshold"
        );

        self.start_voting(&mut proposal, &caller);
        self.proposals(proposal_id).set(&proposal);
    }

    /// Opens the voting window and snapshots the quorum denominator. The
    /// window is computed once here, later config changes do not move it.
    fn start_voting(&self, proposal: &mut Proposal<Self::Api>, sponsor: &ManagedAddress) {
        let now = self.blockchain().get_block_timestamp();

        proposal.sponsor = sponsor.clone();
        proposal.voting_starts = now;
        proposal.voting_ends = now + self.voting_period().get();
        proposal.grace_ends = proposal.voting_ends + self.grace_period().get();
        proposal.max_total_supply_at_vote = self.total_supply();

        self.latest_sponsored_proposal_id().set(proposal.id);
        self.proposal_sponsored_event(
            proposal.id,
            sponsor,
            now,
            &proposal.max_total_supply_at_vote,
        );
    }

    // ========================================================
    // ENDPOINTS: submitVote / submitVoteWithSig
    // ========================================================

    #[endpoint(submitVote)]
    fn submit_vote(&self, proposal_id: u64, approved: bool) {
        let caller = self.blockchain().get_caller();
        self.cast_vote(&caller, proposal_id, approved);
    }

    #[endpoint(submitVoteWithSig)]
    fn submit_vote_with_sig(
        &self,
        voter: ManagedAddress,
        expiry: u64,
        nonce: u64,
        proposal_id: u64,
        approved: bool,
        signature: ManagedBuffer,
    ) {
        let message = self.ballot_message(proposal_id, approved, nonce, expiry);
        self.consume_signature(&voter, nonce, expiry, &message, &signature);
        self.cast_vote(&voter, proposal_id, approved);
    }

    fn cast_vote(&self, voter: &ManagedAddress, proposal_id: u64, approved: bool) {
        require!(
            self.proposal_state(proposal_id) == ProposalState::Voting,
            "Proposal is not in voting"
        );
        require!(
            !self.member_voted(proposal_id, voter).get(),
            "Already voted"
        );

        let mut proposal = self.proposals(proposal_id).get();
        let weight = self.prior_votes(voter, proposal.voting_starts);
        require!(weight > 0u64, "No voting power");

        if approved {
            proposal.yes_votes += &weight;
            self.highest_yes_vote(voter).update(|highest| {
                if proposal_id > *highest {
                    *highest = proposal_id;
                }
            });
        } else {
            proposal.no_votes += &weight;
        }

        // Supply minted since sponsorship must not make quorum easier
        let total_supply = self.total_supply();
        if total_supply > proposal.max_total_supply_at_vote {
            proposal.max_total_supply_at_vote = total_supply;
        }

        self.member_voted(proposal_id, voter).set(true);
        self.proposals(proposal_id).set(&proposal);

        self.vote_event(proposal_id, voter, approved, &weight);
    }

    // ========================================================
    // ENDPOINT: cancelProposal
    // ========================================================

    #[endpoint(cancelProposal)]
    fn cancel_proposal(&self, proposal_id: u64) {
        let state = self.proposal_state(proposal_id);
        require!(
            state == ProposalState::Submitted || state == ProposalState::Voting,
            "Proposal cannot be cancelled"
        );

        let caller = self.blockchain().get_caller();
        let mut proposal = self.proposals(proposal_id).get();
        let sponsor_lost_standing =
            self.current_votes(&proposal.sponsor) < self.sponsor_threshold().get();
        require!(
            caller == proposal.sponsor || self.is_governor(&caller) || sponsor_lost_standing,
            "Not allowed to cancel"
        );

        proposal.flags.cancelled = true;
        self.proposals(proposal_id).set(&proposal);

        self.proposal_cancelled_event(proposal_id, &caller);
    }

    // ========================================================
    // ENDPOINT: processProposal
    // Strictly in id order. Processing is final whether or not
    // the proposal passed or its actions succeed.
    // ========================================================

    #[endpoint(processProposal)]
    fn process_proposal(&self, proposal_id: u64, payload: ManagedBuffer) {
        require!(
            self.proposal_state(proposal_id) != ProposalState::Unborn,
            "Proposal does not exist"
        );
        self.require_previous_resolved(proposal_id);
        require!(
            self.proposal_state(proposal_id) == ProposalState::Ready,
            "Proposal is not ready"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            self.crypto().keccak256(&payload) == proposal.payload_hash,
            "Payload does not match proposal"
        );
        self.require_gas_for(proposal.max_gas);

        let now = self.blockchain().get_block_timestamp();
        let passed = self.has_passed(&proposal, now);

        proposal.flags.processed = true;
        proposal.flags.passed = passed;
        self.proposals(proposal_id).set(&proposal);

        let executes = passed && !payload.is_empty();
        self.proposal_processed_event(proposal_id, passed, executes);

        if executes {
            self.dispatch_actions(proposal_id, payload);
        }
    }

    fn has_passed(&self, proposal: &Proposal<Self::Api>, now: u64) -> bool {
        if proposal.is_expired(now) || proposal.yes_votes <= proposal.no_votes {
            return false;
        }

        let max_supply = &proposal.max_total_supply_at_vote;
        let quorum_met = &proposal.yes_votes * PERCENT >= max_supply * self.quorum_percent().get();
        let retention_met =
            self.total_supply() * PERCENT >= max_supply * self.min_retention_percent().get();

        quorum_met && retention_met
    }

    /// Every lower id must already be cancelled or processed.
    fn require_previous_resolved(&self, proposal_id: u64) {
        let previous = proposal_id - 1;
        require!(
            self.advance_resolved_through(previous) >= previous,
            "Previous proposal unresolved"
        );
    }

    /// Shares plus loot: the quorum and retention denominator.
    fn total_supply(&self) -> BigUint {
        self.total_shares().get() + self.total_loot().get()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProposalState)]
    fn get_proposal_state(&self, proposal_id: u64) -> ProposalState {
        self.proposal_state(proposal_id)
    }

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );
        self.proposals(proposal_id).get()
    }

    /// (cancelled, processed, passed, actionFailed)
    #[view(getProposalStatus)]
    fn get_proposal_status(&self, proposal_id: u64) -> MultiValue4<bool, bool, bool, bool> {
        let flags = self.get_proposal(proposal_id).flags;
        (
            flags.cancelled,
            flags.processed,
            flags.passed,
            flags.action_failed,
        )
            .into()
    }

    #[view(getTotalSupply)]
    fn get_total_supply(&self) -> BigUint {
        self.total_supply()
    }
}
