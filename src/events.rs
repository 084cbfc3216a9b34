multiversx_sc::imports!();

use crate::types::{GovernanceParams, Hash32};

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Proposals ──

    #[event("proposalSubmitted")]
    fn proposal_submitted_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] self_sponsored: bool,
        #[indexed] expiration: u64,
        details_hash: &Hash32<Self::Api>,
    );

    #[event("proposalSponsored")]
    fn proposal_sponsored_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] sponsor: &ManagedAddress,
        #[indexed] voting_starts: u64,
        max_total_supply: &BigUint,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] approved: bool,
        weight: &BigUint,
    );

    #[event("proposalProcessed")]
    fn proposal_processed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] passed: bool,
        #[indexed] executed: bool,
    );

    #[event("proposalActionFailed")]
    fn proposal_action_failed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] err_code: u32,
        err_msg: &ManagedBuffer,
    );

    #[event("proposalCancelled")]
    fn proposal_cancelled_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] cancelled_by: &ManagedAddress,
    );

    // ── Exit ──

    #[event("ragequit")]
    fn ragequit_event(
        &self,
        #[indexed] member: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] shares_burned: &BigUint,
        #[indexed] loot_burned: &BigUint,
        payouts: &ManagedVec<EsdtTokenPayment>,
    );

    // ── Permissions & config ──

    #[event("shamanSet")]
    fn shaman_set_event(&self, #[indexed] shaman: &ManagedAddress, #[indexed] permission: u8);

    #[event("lockEngaged")]
    fn lock_engaged_event(&self, #[indexed] permission: u8, #[indexed] locked_by: &ManagedAddress);

    #[event("governanceConfig")]
    fn governance_config_event(&self, params: &GovernanceParams<Self::Api>);

    #[event("adminConfig")]
    fn admin_config_event(&self, #[indexed] shares_paused: bool, #[indexed] loot_paused: bool);

    #[event("guildTokenSet")]
    fn guild_token_set_event(&self, #[indexed] token: &TokenIdentifier, #[indexed] enabled: bool);

    #[event("executeAsDao")]
    fn execute_as_dao_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] target: &ManagedAddress,
        #[indexed] egld_value: &BigUint,
        data: &ManagedBuffer,
    );

    // ── Shares (voting power) ──

    #[event("sharesMinted")]
    fn shares_minted_event(&self, #[indexed] to: &ManagedAddress, amount: &BigUint);

    #[event("sharesBurned")]
    fn shares_burned_event(&self, #[indexed] from: &ManagedAddress, amount: &BigUint);

    #[event("sharesTransferred")]
    fn shares_transferred_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("delegateChanged")]
    fn delegate_changed_event(
        &self,
        #[indexed] delegator: &ManagedAddress,
        #[indexed] from_delegate: &ManagedAddress,
        #[indexed] to_delegate: &ManagedAddress,
    );

    #[event("delegateVotesChanged")]
    fn delegate_votes_changed_event(
        &self,
        #[indexed] delegate: &ManagedAddress,
        #[indexed] previous_votes: &BigUint,
        new_votes: &BigUint,
    );

    // ── Loot (economic claim) ──

    #[event("lootMinted")]
    fn loot_minted_event(&self, #[indexed] to: &ManagedAddress, amount: &BigUint);

    #[event("lootBurned")]
    fn loot_burned_event(&self, #[indexed] from: &ManagedAddress, amount: &BigUint);

    #[event("lootTransferred")]
    fn loot_transferred_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );
}
