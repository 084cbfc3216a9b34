multiversx_sc::imports!();

use crate::treasury_proxy;

/// Every call toward the treasury goes through here.
#[multiversx_sc::module]
pub trait ExecutorModule:
    crate::config::ConfigModule
    + crate::events::EventsModule
    + crate::permissions::PermissionsModule
    + crate::storage::StorageModule
{
    // ========================================================
    // ENDPOINT: executeAsDao
    // Single administrative call outside the proposal flow.
    // ========================================================

    #[endpoint(executeAsDao)]
    fn execute_as_dao(&self, target: ManagedAddress, egld_value: BigUint, data: ManagedBuffer) {
        self.require_governor();
        require!(!target.is_zero(), "Invalid target");

        let caller = self.blockchain().get_caller();
        self.execute_as_dao_event(&caller, &target, &egld_value, &data);

        let treasury = self.treasury().get();
        self.tx()
            .to(&treasury)
            .typed(treasury_proxy::TreasuryProxy)
            .execute(target, egld_value, data)
            .sync_call();
    }

    // ========================================================
    // INTERNAL: proposal actions
    // ========================================================

    fn require_gas_for(&self, max_gas: u64) {
        require!(
            max_gas == 0 || self.blockchain().get_gas_left() >= max_gas,
            "Not enough gas"
        );
    }

    /// Hands the committed batch to the treasury and ends execution. The
    /// proposal is already stored as processed by then; the callback only
    /// records whether the batch failed. The async call carries all gas left,
    /// `max_gas` is enforced beforehand by `require_gas_for`.
    fn dispatch_actions(&self, proposal_id: u64, payload: ManagedBuffer) {
        let treasury = self.treasury().get();
        self.tx()
            .to(&treasury)
            .typed(treasury_proxy::TreasuryProxy)
            .execute_batch(payload)
            .callback(self.callbacks().action_callback(proposal_id))
            .async_call_and_exit();
    }

    #[callback]
    fn action_callback(
        &self,
        proposal_id: u64,
        #[call_result] result: ManagedAsyncCallResult<()>,
    ) {
        if let ManagedAsyncCallResult::Err(err) = result {
            self.proposals(proposal_id)
                .update(|proposal| proposal.flags.action_failed = true);
            self.proposal_action_failed_event(proposal_id, err.err_code, &err.err_msg);
        }
    }

    /// Instructs the treasury to pay out part of a guild token.
    fn treasury_send(&self, to: &ManagedAddress, token: &TokenIdentifier, amount: &BigUint) {
        let treasury = self.treasury().get();
        self.tx()
            .to(&treasury)
            .typed(treasury_proxy::TreasuryProxy)
            .send_token(to, token, amount)
            .sync_call();
    }

    fn treasury_balance(&self, token: &TokenIdentifier) -> BigUint {
        let treasury = self.treasury().get();
        self.tx()
            .to(&treasury)
            .typed(treasury_proxy::TreasuryProxy)
            .token_balance(token)
            .returns(ReturnsResult)
            .sync_call()
    }
}
