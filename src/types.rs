multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// keccak256 digest, used for committed payloads and proposal details.
pub type Hash32<M> = ManagedByteArray<M, 32>;

// ============================================================
// Permission bits
// ============================================================

pub const PERMISSION_ADMIN: u8 = 0b001;
pub const PERMISSION_MANAGER: u8 = 0b010;
pub const PERMISSION_GOVERNOR: u8 = 0b100;
pub const PERMISSION_ALL: u8 = PERMISSION_ADMIN | PERMISSION_MANAGER | PERMISSION_GOVERNOR;

// ============================================================
// Proposal State — derived lazily from stored timestamps
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalState {
    /// Id 0 or an id that was never allocated.
    Unborn,
    /// Waiting for a sponsor.
    Submitted,
    /// Sponsored, voting window open.
    Voting,
    /// Cancelled by the sponsor, a governor, or after the sponsor lost standing.
    Cancelled,
    /// Voting closed, dissenters may still ragequit.
    Grace,
    /// Grace elapsed, waiting for processing.
    Ready,
    /// Processed and passed.
    Processed,
    /// Processed and did not pass.
    Defeated,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ProposalFlags {
    pub cancelled: bool,
    pub processed: bool,
    pub passed: bool,
    pub action_failed: bool,
}

impl ProposalFlags {
    /// Cancelled and processed proposals no longer hold up the processing queue.
    pub fn is_resolved(&self) -> bool {
        self.cancelled || self.processed
    }
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    /// keccak256 of the action payload committed at submission
    pub payload_hash: Hash32<M>,
    pub details_hash: Hash32<M>,
    pub proposer: ManagedAddress<M>,
    /// Zero address until sponsored
    pub sponsor: ManagedAddress<M>,
    pub voting_starts: u64,
    pub voting_ends: u64,
    pub grace_ends: u64,
    /// 0 means the proposal never expires
    pub expiration: u64,
    /// 0 means no gas requirement at processing time
    pub max_gas: u64,
    pub yes_votes: BigUint<M>,
    pub no_votes: BigUint<M>,
    /// Shares + loot at sponsorship, only ever raised while voting
    pub max_total_supply_at_vote: BigUint<M>,
    pub flags: ProposalFlags,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn is_sponsored(&self) -> bool {
        self.voting_starts != 0
    }

    pub fn is_expired(&self, now: u64) -> bool {
        is_expired(self.expiration, now)
    }

    pub fn state_at(&self, now: u64) -> ProposalState {
        if self.flags.cancelled {
            ProposalState::Cancelled
        } else if !self.is_sponsored() {
            ProposalState::Submitted
        } else if now < self.voting_ends {
            ProposalState::Voting
        } else if now < self.grace_ends {
            ProposalState::Grace
        } else if !self.flags.processed {
            ProposalState::Ready
        } else if self.flags.passed {
            ProposalState::Processed
        } else {
            ProposalState::Defeated
        }
    }
}

pub fn is_expired(expiration: u64, now: u64) -> bool {
    expiration != 0 && expiration <= now
}

// ============================================================
// Checkpoint — voting power of a delegate from a timestamp on
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Checkpoint<M: ManagedTypeApi> {
    pub from_timestamp: u64,
    pub votes: BigUint<M>,
}

// ============================================================
// Governance parameters — packed argument of setGovernanceConfig
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct GovernanceParams<M: ManagedTypeApi> {
    /// Seconds a sponsored proposal stays open. 0 leaves the current value.
    pub voting_period: u64,
    /// Seconds between voting end and processing. 0 leaves the current value.
    pub grace_period: u64,
    /// EGLD required to submit without enough voting power to self-sponsor
    pub proposal_offering: BigUint<M>,
    pub quorum_percent: u64,
    pub sponsor_threshold: BigUint<M>,
    pub min_retention_percent: u64,
}
