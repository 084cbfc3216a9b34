multiversx_sc::imports!();

use crate::types::GovernanceParams;

/// Quorum and retention are whole percentages of the snapshot supply.
pub const MAX_PERCENT: u64 = 100;

/// Economic and timing parameters plus the one-way capability locks.
///
/// Writes go through the gated endpoints of the permissions module; this module
/// only owns the storage and the update rules.
#[multiversx_sc::module]
pub trait ConfigModule: crate::events::EventsModule {
    /// Applies a parameter set. Zero periods keep the stored value.
    fn apply_governance_params(&self, params: &GovernanceParams<Self::Api>) {
        require!(
            params.quorum_percent <= MAX_PERCENT,
            "Quorum percent out of range"
        );
        require!(
            params.min_retention_percent <= MAX_PERCENT,
            "Retention percent out of range"
        );

        if params.voting_period != 0 {
            self.voting_period().set(params.voting_period);
        }
        if params.grace_period != 0 {
            self.grace_period().set(params.grace_period);
        }
        self.proposal_offering().set(&params.proposal_offering);
        self.quorum_percent().set(params.quorum_percent);
        self.sponsor_threshold().set(&params.sponsor_threshold);
        self.min_retention_percent().set(params.min_retention_percent);

        self.governance_config_event(&self.current_governance_params());
    }

    fn apply_admin_config(&self, shares_paused: bool, loot_paused: bool) {
        self.shares_paused().set(shares_paused);
        self.loot_paused().set(loot_paused);
        self.admin_config_event(shares_paused, loot_paused);
    }

    #[view(getGovernanceConfig)]
    fn current_governance_params(&self) -> GovernanceParams<Self::Api> {
        GovernanceParams {
            voting_period: self.voting_period().get(),
            grace_period: self.grace_period().get(),
            proposal_offering: self.proposal_offering().get(),
            quorum_percent: self.quorum_percent().get(),
            sponsor_threshold: self.sponsor_threshold().get(),
            min_retention_percent: self.min_retention_percent().get(),
        }
    }

    /// The treasury, or this contract acting on its own behalf.
    fn is_engine(&self, address: &ManagedAddress) -> bool {
        *address == self.treasury().get() || *address == self.blockchain().get_sc_address()
    }

    // ── Timing & economics ──

    #[view(getVotingPeriod)]
    #[storage_mapper("votingPeriod")]
    fn voting_period(&self) -> SingleValueMapper<u64>;

    #[view(getGracePeriod)]
    #[storage_mapper("gracePeriod")]
    fn grace_period(&self) -> SingleValueMapper<u64>;

    #[view(getProposalOffering)]
    #[storage_mapper("proposalOffering")]
    fn proposal_offering(&self) -> SingleValueMapper<BigUint>;

    #[view(getQuorumPercent)]
    #[storage_mapper("quorumPercent")]
    fn quorum_percent(&self) -> SingleValueMapper<u64>;

    #[view(getSponsorThreshold)]
    #[storage_mapper("sponsorThreshold")]
    fn sponsor_threshold(&self) -> SingleValueMapper<BigUint>;

    #[view(getMinRetentionPercent)]
    #[storage_mapper("minRetentionPercent")]
    fn min_retention_percent(&self) -> SingleValueMapper<u64>;

    // ── One-way locks ──

    #[view(isAdminLocked)]
    #[storage_mapper("adminLocked")]
    fn admin_locked(&self) -> SingleValueMapper<bool>;

    #[view(isManagerLocked)]
    #[storage_mapper("managerLocked")]
    fn manager_locked(&self) -> SingleValueMapper<bool>;

    #[view(isGovernorLocked)]
    #[storage_mapper("governorLocked")]
    fn governor_locked(&self) -> SingleValueMapper<bool>;

    // ── Pauses ──

    #[view(isSharesPaused)]
    #[storage_mapper("sharesPaused")]
    fn shares_paused(&self) -> SingleValueMapper<bool>;

    #[view(isLootPaused)]
    #[storage_mapper("lootPaused")]
    fn loot_paused(&self) -> SingleValueMapper<bool>;

    // ── Wiring ──

    #[view(getTreasury)]
    #[storage_mapper("treasury")]
    fn treasury(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getDaoName)]
    #[storage_mapper("daoName")]
    fn dao_name(&self) -> SingleValueMapper<ManagedBuffer>;

    #[view(getChainId)]
    #[storage_mapper("chainId")]
    fn chain_id(&self) -> SingleValueMapper<ManagedBuffer>;
}
