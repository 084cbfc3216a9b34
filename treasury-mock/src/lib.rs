#![no_std]

multiversx_sc::imports!();

/// Batch payload the mock refuses, to exercise failed proposal actions.
pub const REVERTING_BATCH: &[u8] = b"revert";

/// Stand-in treasury for the guild DAO integration tests. Holds guild tokens,
/// pays them out and records every call the DAO makes.
#[multiversx_sc::contract]
pub trait TreasuryMock {
    #[init]
    fn init(&self, dao: ManagedAddress) {
        self.dao().set(&dao);
    }

    #[upgrade]
    fn upgrade(&self) {}

    #[endpoint(executeBatch)]
    fn execute_batch(&self, payload: ManagedBuffer) {
        self.require_dao();
        require!(payload != *REVERTING_BATCH, "Batch reverted");
        self.executed_batches().push(&payload);
    }

    #[endpoint(execute)]
    fn execute(&self, target: ManagedAddress, egld_value: BigUint, data: ManagedBuffer) {
        self.require_dao();
        self.last_call_target().set(&target);
        self.last_call_value().set(&egld_value);
        self.last_call_data().set(&data);
    }

    #[endpoint(sendToken)]
    fn send_token(&self, to: ManagedAddress, token: TokenIdentifier, amount: BigUint) {
        self.require_dao();
        self.tx().to(&to).single_esdt(&token, 0, &amount).transfer();
    }

    #[view(getTokenBalance)]
    fn token_balance(&self, token: TokenIdentifier) -> BigUint {
        let own_address = self.blockchain().get_sc_address();
        self.blockchain().get_esdt_balance(&own_address, &token, 0)
    }

    fn require_dao(&self) {
        require!(
            self.blockchain().get_caller() == self.dao().get(),
            "Caller is not the DAO"
        );
    }

    #[storage_mapper("dao")]
    fn dao(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getExecutedBatches)]
    #[storage_mapper("executedBatches")]
    fn executed_batches(&self) -> VecMapper<ManagedBuffer>;

    #[storage_mapper("lastCallTarget")]
    fn last_call_target(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("lastCallValue")]
    fn last_call_value(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("lastCallData")]
    fn last_call_data(&self) -> SingleValueMapper<ManagedBuffer>;
}
