multiversx_sc::imports!();

/// Economic claim without voting weight. Counts toward the quorum and retention
/// denominator through its total supply only.
#[multiversx_sc::module]
pub trait LootModule:
    crate::config::ConfigModule + crate::events::EventsModule + crate::permissions::PermissionsModule
{
    #[endpoint(mintLoot)]
    fn mint_loot(&self, mints: MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>>) {
        self.require_manager();

        for entry in mints {
            let (to, amount) = entry.into_tuple();
            self.mint_loot_to(&to, &amount);
        }
    }

    #[endpoint(burnLoot)]
    fn burn_loot(&self, burns: MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>>) {
        self.require_manager();

        for entry in burns {
            let (from, amount) = entry.into_tuple();
            self.burn_loot_from(&from, &amount);
        }
    }

    #[endpoint(transferLoot)]
    fn transfer_loot(&self, to: ManagedAddress, amount: BigUint) {
        require!(!self.loot_paused().get(), "Loot is paused");
        require!(!to.is_zero(), "Invalid recipient");

        let caller = self.blockchain().get_caller();
        require!(
            self.loot_balance(&caller).get() >= amount,
            "Insufficient loot"
        );

        self.loot_balance(&caller).update(|b| *b -= &amount);
        self.loot_balance(&to).update(|b| *b += &amount);

        self.loot_transferred_event(&caller, &to, &amount);
    }

    fn mint_loot_to(&self, to: &ManagedAddress, amount: &BigUint) {
        require!(!to.is_zero(), "Invalid recipient");

        self.loot_balance(to).update(|b| *b += amount);
        self.total_loot().update(|t| *t += amount);

        self.loot_minted_event(to, amount);
    }

    fn burn_loot_from(&self, from: &ManagedAddress, amount: &BigUint) {
        require!(
            self.loot_balance(from).get() >= *amount,
            "Insufficient loot"
        );

        self.loot_balance(from).update(|b| *b -= amount);
        self.total_loot().update(|t| *t -= amount);

        self.loot_burned_event(from, amount);
    }

    #[view(getLootBalance)]
    #[storage_mapper("lootBalance")]
    fn loot_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getTotalLoot)]
    #[storage_mapper("totalLoot")]
    fn total_loot(&self) -> SingleValueMapper<BigUint>;
}
