#![no_std]

multiversx_sc::imports!();

pub mod config;
pub mod events;
pub mod executor;
pub mod loot;
pub mod permissions;
pub mod proposals;
pub mod ragequit;
pub mod shares;
pub mod signatures;
pub mod storage;
pub mod treasury_proxy;
pub mod types;

use types::GovernanceParams;

// ============================================================
// Contract
// ============================================================

/// Member-governed treasury controller: shares vote, loot only claims,
/// passed proposals drive the treasury and anyone may ragequit.
#[multiversx_sc::contract]
pub trait GuildDao:
    config::ConfigModule
    + events::EventsModule
    + permissions::PermissionsModule
    + signatures::SignaturesModule
    + shares::SharesModule
    + loot::LootModule
    + storage::StorageModule
    + executor::ExecutorModule
    + proposals::ProposalsModule
    + ragequit::RagequitModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        treasury: ManagedAddress,
        dao_name: ManagedBuffer,
        chain_id: ManagedBuffer,
        params: GovernanceParams<Self::Api>,
        shares_paused: bool,
        loot_paused: bool,
        initial_shamans: MultiValueEncoded<MultiValue2<ManagedAddress, u8>>,
    ) {
        require!(!treasury.is_zero(), "Invalid treasury address");
        require!(params.voting_period > 0, "Voting period must be positive");

        self.treasury().set(&treasury);
        self.dao_name().set(&dao_name);
        self.chain_id().set(&chain_id);

        self.apply_governance_params(&params);
        self.apply_admin_config(shares_paused, loot_paused);

        for entry in initial_shamans {
            let (shaman, permission) = entry.into_tuple();
            self.set_shaman_permission(&shaman, permission);
        }
    }

    #[upgrade]
    fn upgrade(&self) {}
}
