multiversx_sc::imports!();

use crate::types::Checkpoint;

/// Voting power. Every balance change lands as a checkpoint on the holder's
/// delegate, so past voting power can be looked up by timestamp.
#[multiversx_sc::module]
pub trait SharesModule:
    crate::config::ConfigModule
    + crate::events::EventsModule
    + crate::permissions::PermissionsModule
    + crate::signatures::SignaturesModule
{
    // ========================================================
    // ENDPOINTS: mint / burn (manager only)
    // ========================================================

    #[endpoint(mintShares)]
    fn mint_shares(&self, mints: MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>>) {
        self.require_manager();

        for entry in mints {
            let (to, amount) = entry.into_tuple();
            self.mint_shares_to(&to, &amount);
        }
    }

    #[endpoint(burnShares)]
    fn burn_shares(&self, burns: MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>>) {
        self.require_manager();

        for entry in burns {
            let (from, amount) = entry.into_tuple();
            self.burn_shares_from(&from, &amount);
        }
    }

    // ========================================================
    // ENDPOINT: transferShares
    // ========================================================

    #[endpoint(transferShares)]
    fn transfer_shares(&self, to: ManagedAddress, amount: BigUint) {
        require!(!self.shares_paused().get(), "Shares are paused");
        require!(!to.is_zero(), "Invalid recipient");

        let caller = self.blockchain().get_caller();
        require!(
            self.shares_balance(&caller).get() >= amount,
            "Insufficient shares"
        );

        self.ensure_delegated(&to);
        self.shares_balance(&caller).update(|b| *b -= &amount);
        self.shares_balance(&to).update(|b| *b += &amount);
        self.move_delegates(&self.delegate_of(&caller), &self.delegate_of(&to), &amount);

        self.shares_transferred_event(&caller, &to, &amount);
    }

    // ========================================================
    // ENDPOINTS: delegation
    // ========================================================

    #[endpoint(delegate)]
    fn delegate(&self, delegatee: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.set_delegate(&caller, &delegatee);
    }

    #[endpoint(delegateBySig)]
    fn delegate_by_sig(
        &self,
        delegator: ManagedAddress,
        delegatee: ManagedAddress,
        nonce: u64,
        expiry: u64,
        signature: ManagedBuffer,
    ) {
        let message = self.delegation_message(&delegatee, nonce, expiry);
        self.consume_signature(&delegator, nonce, expiry, &message, &signature);
        self.set_delegate(&delegator, &delegatee);
    }

    // ========================================================
    // INTERNAL: balance changes
    // ========================================================

    fn mint_shares_to(&self, to: &ManagedAddress, amount: &BigUint) {
        require!(!to.is_zero(), "Invalid recipient");

        self.ensure_delegated(to);
        self.shares_balance(to).update(|b| *b += amount);
        self.total_shares().update(|t| *t += amount);
        self.move_delegates(&ManagedAddress::zero(), &self.delegate_of(to), amount);

        self.shares_minted_event(to, amount);
    }

    /// Also used by ragequit, which is why the pause flag is not consulted here.
    fn burn_shares_from(&self, from: &ManagedAddress, amount: &BigUint) {
        require!(
            self.shares_balance(from).get() >= *amount,
            "Insufficient shares"
        );

        self.shares_balance(from).update(|b| *b -= amount);
        self.total_shares().update(|t| *t -= amount);
        self.move_delegates(&self.delegate_of(from), &ManagedAddress::zero(), amount);

        self.shares_burned_event(from, amount);
    }

    /// First-time recipients delegate to themselves.
    fn ensure_delegated(&self, account: &ManagedAddress) {
        if !self.delegates(account).is_empty() {
            return;
        }
        self.delegates(account).set(account);
        self.delegate_changed_event(account, &ManagedAddress::zero(), account);
    }

    fn set_delegate(&self, delegator: &ManagedAddress, delegatee: &ManagedAddress) {
        require!(!delegatee.is_zero(), "Invalid delegatee");

        let previous = self.delegate_of(delegator);
        self.delegates(delegator).set(delegatee);
        self.delegate_changed_event(delegator, &previous, delegatee);

        let balance = self.shares_balance(delegator).get();
        self.move_delegates(&previous, delegatee, &balance);
    }

    fn delegate_of(&self, account: &ManagedAddress) -> ManagedAddress {
        if self.delegates(account).is_empty() {
            ManagedAddress::zero()
        } else {
            self.delegates(account).get()
        }
    }

    fn move_delegates(&self, from: &ManagedAddress, to: &ManagedAddress, amount: &BigUint) {
        if from == to || *amount == 0u64 {
            return;
        }

        if !from.is_zero() {
            let previous = self.current_votes(from);
            let updated = &previous - amount;
            self.write_checkpoint(from, &previous, updated);
        }
        if !to.is_zero() {
            let previous = self.current_votes(to);
            let updated = &previous + amount;
            self.write_checkpoint(to, &previous, updated);
        }
    }

    /// Overwrites the latest checkpoint when it already belongs to this block
    /// timestamp, which keeps checkpoint timestamps strictly increasing.
    fn write_checkpoint(&self, delegatee: &ManagedAddress, previous: &BigUint, votes: BigUint) {
        let now = self.blockchain().get_block_timestamp();
        let mut checkpoints = self.checkpoints(delegatee);
        let count = checkpoints.len();

        self.delegate_votes_changed_event(delegatee, previous, &votes);

        if count > 0 {
            let mut latest = checkpoints.get(count);
            if latest.from_timestamp == now {
                latest.votes = votes;
                checkpoints.set(count, &latest);
                return;
            }
        }

        checkpoints.push(&Checkpoint {
            from_timestamp: now,
            votes,
        });
    }

    // ========================================================
    // VIEWS — voting power
    // ========================================================

    #[view(getCurrentVotes)]
    fn current_votes(&self, account: &ManagedAddress) -> BigUint {
        let checkpoints = self.checkpoints(account);
        let count = checkpoints.len();
        if count == 0 {
            return BigUint::zero();
        }
        checkpoints.get(count).votes
    }

    /// Voting power of `account` as of `timestamp`, which must be in the past.
    #[view(getPriorVotes)]
    fn prior_votes(&self, account: &ManagedAddress, timestamp: u64) -> BigUint {
        require!(
            timestamp < self.blockchain().get_block_timestamp(),
            "Timestamp not yet determined"
        );

        let checkpoints = self.checkpoints(account);
        let count = checkpoints.len();
        if count == 0 {
            return BigUint::zero();
        }

        let latest = checkpoints.get(count);
        if latest.from_timestamp <= timestamp {
            return latest.votes;
        }
        if checkpoints.get(1).from_timestamp > timestamp {
            return BigUint::zero();
        }

        // checkpoints[lower] <= timestamp < checkpoints[count]
        let mut lower = 1usize;
        let mut upper = count - 1;
        while upper > lower {
            let center = upper - (upper - lower) / 2;
            let checkpoint = checkpoints.get(center);
            if checkpoint.from_timestamp == timestamp {
                return checkpoint.votes;
            }
            if checkpoint.from_timestamp < timestamp {
                lower = center;
            } else {
                upper = center - 1;
            }
        }
        checkpoints.get(lower).votes
    }

    #[view(getNumCheckpoints)]
    fn num_checkpoints(&self, account: &ManagedAddress) -> usize {
        self.checkpoints(account).len()
    }

    /// 1-based, like the underlying mapper.
    #[view(getCheckpoint)]
    fn get_checkpoint(&self, account: &ManagedAddress, index: usize) -> Checkpoint<Self::Api> {
        let checkpoints = self.checkpoints(account);
        require!(index >= 1 && index <= checkpoints.len(), "Checkpoint does not exist");
        checkpoints.get(index)
    }

    #[view(getDelegate)]
    fn get_delegate(&self, account: &ManagedAddress) -> ManagedAddress {
        self.delegate_of(account)
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getSharesBalance)]
    #[storage_mapper("sharesBalance")]
    fn shares_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[view(getTotalShares)]
    #[storage_mapper("totalShares")]
    fn total_shares(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("delegates")]
    fn delegates(&self, account: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("checkpoints")]
    fn checkpoints(&self, delegatee: &ManagedAddress) -> VecMapper<Checkpoint<Self::Api>>;
}
