multiversx_sc::imports!();

/// Comparison buffer for token identifiers. The longest valid ESDT identifier
/// is 17 bytes (10-char ticker, dash, 6 hex chars); the rest is headroom.
const MAX_TOKEN_ID_LEN: usize = 32;

#[multiversx_sc::module]
pub trait RagequitModule:
    crate::config::ConfigModule
    + crate::events::EventsModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
    + crate::shares::SharesModule
    + crate::loot::LootModule
    + crate::storage::StorageModule
    + crate::executor::ExecutorModule
    + crate::proposals::ProposalsModule
{
    // ========================================================
    // ENDPOINT: ragequit
    // Burns shares and/or loot for a pro-rata cut of each listed
    // guild token. Works while shares and loot are paused.
    // ========================================================

    #[endpoint(ragequit)]
    fn ragequit(
        &self,
        to: ManagedAddress,
        shares_to_burn: BigUint,
        loot_to_burn: BigUint,
        tokens: MultiValueEncoded<TokenIdentifier>,
    ) {
        let caller = self.blockchain().get_caller();
        require!(!to.is_zero(), "Invalid recipient");

        let total_claim = &shares_to_burn + &loot_to_burn;
        require!(total_claim > 0u64, "Nothing to ragequit");
        require!(
            self.shares_balance(&caller).get() >= shares_to_burn,
            "Insufficient shares"
        );
        require!(
            self.loot_balance(&caller).get() >= loot_to_burn,
            "Insufficient loot"
        );

        // Every proposal up to the highest yes vote must be resolved before
        // that vote's weight can leave
        let highest_yes_vote = self.highest_yes_vote(&caller).get();
        require!(
            self.advance_resolved_through(highest_yes_vote) >= highest_yes_vote,
            "Yes vote on unresolved proposal"
        );

        let tokens = tokens.to_vec();
        self.require_guild_token_list(&tokens);

        // Snapshot before burning: every token pays out the same fraction
        let total_supply = self.total_supply();
        let mut payouts: ManagedVec<EsdtTokenPayment> = ManagedVec::new();
        for token in tokens.iter() {
            let balance = self.treasury_balance(&token);
            let amount = self.pro_rata_share(&balance, &total_claim, &total_supply);
            if amount > 0u64 {
                payouts.push(EsdtTokenPayment::new(token.clone_value(), 0, amount));
            }
        }

        if shares_to_burn > 0u64 {
            self.burn_shares_from(&caller, &shares_to_burn);
        }
        if loot_to_burn > 0u64 {
            self.burn_loot_from(&caller, &loot_to_burn);
        }

        for payout in payouts.iter() {
            self.treasury_send(&to, &payout.token_identifier, &payout.amount);
        }

        self.ragequit_event(&caller, &to, &shares_to_burn, &loot_to_burn, &payouts);
    }

    /// Strictly ascending and made of guild tokens only.
    fn require_guild_token_list(&self, tokens: &ManagedVec<TokenIdentifier>) {
        let guild_tokens = self.guild_tokens();
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                let previous = tokens.get(index - 1);
                require!(
                    self.token_precedes(&previous, &token),
                    "Tokens must be strictly ascending"
                );
            }
            require!(guild_tokens.contains(&token), "Token is not a guild token");
        }
    }

    /// `balance * claim / supply`, rounded down.
    fn pro_rata_share(&self, balance: &BigUint, claim: &BigUint, supply: &BigUint) -> BigUint {
        if *supply == 0u64 {
            return BigUint::zero();
        }
        (balance * claim) / supply
    }

    /// Byte-wise ordering of token identifiers; equal identifiers do not precede.
    fn token_precedes(&self, first: &TokenIdentifier, second: &TokenIdentifier) -> bool {
        let mut first_bytes = [0u8; MAX_TOKEN_ID_LEN];
        let mut second_bytes = [0u8; MAX_TOKEN_ID_LEN];
        let first_slice = first.as_managed_buffer().load_to_byte_array(&mut first_bytes);
        let second_slice = second.as_managed_buffer().load_to_byte_array(&mut second_bytes);
        first_slice < second_slice
    }

    // ========================================================
    // ENDPOINTS: guild token set (governor only)
    // ========================================================

    #[endpoint(setGuildTokens)]
    fn set_guild_tokens(&self, tokens: MultiValueEncoded<TokenIdentifier>) {
        self.require_governor();

        for token in tokens {
            require!(token.is_valid_esdt_identifier(), "Invalid token identifier");
            if self.guild_tokens().insert(token.clone()) {
                self.guild_token_set_event(&token, true);
            }
        }
    }

    #[endpoint(unsetGuildTokens)]
    fn unset_guild_tokens(&self, tokens: MultiValueEncoded<TokenIdentifier>) {
        self.require_governor();

        for token in tokens {
            if self.guild_tokens().remove(&token) {
                self.guild_token_set_event(&token, false);
            }
        }
    }

    #[view(getGuildTokens)]
    #[storage_mapper("guildTokens")]
    fn guild_tokens(&self) -> SetMapper<TokenIdentifier>;
}
