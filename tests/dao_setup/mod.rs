#![allow(deprecated)]
#![allow(dead_code)]

use guild_dao::loot::LootModule;
use guild_dao::proposals::ProposalsModule;
use guild_dao::ragequit::RagequitModule;
use guild_dao::shares::SharesModule;
use guild_dao::types::{GovernanceParams, ProposalState, PERMISSION_ALL};
use guild_dao::GuildDao;
use multiversx_sc::codec::multi_types::MultiValue2;
use multiversx_sc::types::{
    Address, BigUint, ManagedBuffer, ManagedByteArray, MultiValueEncoded,
};
use multiversx_sc_scenario::{
    managed_address, managed_biguint, managed_buffer, rust_biguint, whitebox_legacy::*, DebugApi,
};
use treasury_mock::TreasuryMock;

pub const WASM_PATH: &str = "output/guild-dao.wasm";
pub const TREASURY_WASM_PATH: &str = "treasury-mock/output/treasury-mock.wasm";

pub const START: u64 = 1_000;
pub const VOTING_PERIOD: u64 = 100;
pub const GRACE_PERIOD: u64 = 50;
pub const PROPOSAL_OFFERING: u64 = 1_000;
pub const QUORUM_PERCENT: u64 = 10;
pub const SPONSOR_THRESHOLD: u64 = 1;
pub const MIN_RETENTION_PERCENT: u64 = 66;

pub fn default_params() -> GovernanceParams<DebugApi> {
    GovernanceParams {
        voting_period: VOTING_PERIOD,
        grace_period: GRACE_PERIOD,
        proposal_offering: managed_biguint!(PROPOSAL_OFFERING),
        quorum_percent: QUORUM_PERCENT,
        sponsor_threshold: managed_biguint!(SPONSOR_THRESHOLD),
        min_retention_percent: MIN_RETENTION_PERCENT,
    }
}

pub fn empty_details() -> ManagedByteArray<DebugApi, 32> {
    ManagedByteArray::new_from_bytes(&[0u8; 32])
}

pub type TreasuryObjBuilder = fn() -> treasury_mock::ContractObj<DebugApi>;

pub struct DaoSetup<DaoObjBuilder>
where
    DaoObjBuilder: 'static + Copy + Fn() -> guild_dao::ContractObj<DebugApi>,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    pub treasury: Address,
    pub alice: Address,
    pub bob: Address,
    pub dao_wrapper: ContractObjWrapper<guild_dao::ContractObj<DebugApi>, DaoObjBuilder>,
    pub treasury_wrapper:
        ContractObjWrapper<treasury_mock::ContractObj<DebugApi>, TreasuryObjBuilder>,
}

impl<DaoObjBuilder> DaoSetup<DaoObjBuilder>
where
    DaoObjBuilder: 'static + Copy + Fn() -> guild_dao::ContractObj<DebugApi>,
{
    /// Owner holds every permission bit; alice and bob start without shares.
    /// The treasury is a mock contract that only obeys the DAO.
    pub fn new(dao_builder: DaoObjBuilder) -> Self {
        let rust_zero = rust_biguint!(0u64);
        let mut b_mock = BlockchainStateWrapper::new();
        let owner = b_mock.create_user_account(&rust_zero);
        let alice = b_mock.create_user_account(&rust_biguint!(PROPOSAL_OFFERING * 10));
        let bob = b_mock.create_user_account(&rust_biguint!(PROPOSAL_OFFERING * 10));
        let dao_wrapper =
            b_mock.create_sc_account(&rust_zero, Some(&owner), dao_builder, WASM_PATH);
        let treasury_wrapper = b_mock.create_sc_account(
            &rust_zero,
            Some(&owner),
            treasury_mock::contract_obj as TreasuryObjBuilder,
            TREASURY_WASM_PATH,
        );
        let treasury = treasury_wrapper.address_ref().clone();

        b_mock
            .execute_tx(&owner, &treasury_wrapper, &rust_zero, |sc| {
                sc.init(managed_address!(dao_wrapper.address_ref()));
            })
            .assert_ok();

        b_mock
            .execute_tx(&owner, &dao_wrapper, &rust_zero, |sc| {
                let mut shamans = MultiValueEncoded::new();
                shamans.push(MultiValue2::from((managed_address!(&owner), PERMISSION_ALL)));

                sc.init(
                    managed_address!(&treasury),
                    managed_buffer!(b"Guild"),
                    managed_buffer!(b"T"),
                    default_params(),
                    false,
                    false,
                    shamans,
                );
            })
            .assert_ok();

        b_mock.set_block_timestamp(START);

        DaoSetup {
            b_mock,
            owner,
            treasury,
            alice,
            bob,
            dao_wrapper,
            treasury_wrapper,
        }
    }

    pub fn set_time(&mut self, timestamp: u64) {
        self.b_mock.set_block_timestamp(timestamp);
    }

    pub fn mint_shares(&mut self, to: &Address, amount: u64) {
        self.b_mock
            .execute_tx(&self.owner, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                let mut mints = MultiValueEncoded::new();
                mints.push(MultiValue2::from((managed_address!(to), managed_biguint!(amount))));
                sc.mint_shares(mints);
            })
            .assert_ok();
    }

    pub fn mint_loot(&mut self, to: &Address, amount: u64) {
        self.b_mock
            .execute_tx(&self.owner, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                let mut mints = MultiValueEncoded::new();
                mints.push(MultiValue2::from((managed_address!(to), managed_biguint!(amount))));
                sc.mint_loot(mints);
            })
            .assert_ok();
    }

    /// Submits a proposal with an empty action batch.
    pub fn submit_signal(&mut self, from: &Address) -> u64 {
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_tx(from, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                proposal_id = sc.submit_proposal(ManagedBuffer::new(), 0, 0, empty_details());
            })
            .assert_ok();
        proposal_id
    }

    pub fn vote(&mut self, voter: &Address, proposal_id: u64, approved: bool) {
        self.b_mock
            .execute_tx(voter, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                sc.submit_vote(proposal_id, approved);
            })
            .assert_ok();
    }

    pub fn process(&mut self, proposal_id: u64) {
        self.b_mock
            .execute_tx(&self.owner, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                sc.process_proposal(proposal_id, ManagedBuffer::new());
            })
            .assert_ok();
    }

    /// Submits a proposal carrying `payload` and returns its id.
    pub fn submit_with_payload(&mut self, from: &Address, payload: &[u8], max_gas: u64) -> u64 {
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_tx(from, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                proposal_id = sc.submit_proposal(
                    managed_buffer!(payload),
                    0,
                    max_gas,
                    empty_details(),
                );
            })
            .assert_ok();
        proposal_id
    }

    pub fn ragequit_without_tokens(&mut self, member: &Address, shares: u64, loot: u64) {
        self.b_mock
            .execute_tx(member, &self.dao_wrapper, &rust_biguint!(0u64), |sc| {
                sc.ragequit(
                    managed_address!(member),
                    managed_biguint!(shares),
                    managed_biguint!(loot),
                    MultiValueEncoded::new(),
                );
            })
            .assert_ok();
    }

    pub fn proposal_state(&mut self, proposal_id: u64) -> ProposalState {
        let mut state = ProposalState::Unborn;
        self.b_mock
            .execute_query(&self.dao_wrapper, |sc| {
                state = sc.get_proposal_state(proposal_id);
            })
            .assert_ok();
        state
    }

    /// (cancelled, processed, passed, action_failed)
    pub fn proposal_status(&mut self, proposal_id: u64) -> (bool, bool, bool, bool) {
        let mut status = (false, false, false, false);
        self.b_mock
            .execute_query(&self.dao_wrapper, |sc| {
                status = sc.get_proposal_status(proposal_id).into_tuple();
            })
            .assert_ok();
        status
    }

    pub fn current_votes(&mut self, account: &Address) -> u64 {
        let mut votes = 0u64;
        self.b_mock
            .execute_query(&self.dao_wrapper, |sc| {
                votes = to_u64(sc.current_votes(&managed_address!(account)));
            })
            .assert_ok();
        votes
    }

    pub fn total_supply(&mut self) -> u64 {
        let mut supply = 0u64;
        self.b_mock
            .execute_query(&self.dao_wrapper, |sc| {
                supply = to_u64(sc.total_shares().get() + sc.total_loot().get());
            })
            .assert_ok();
        supply
    }
}

pub fn to_u64(value: BigUint<DebugApi>) -> u64 {
    value.to_u64().unwrap()
}
