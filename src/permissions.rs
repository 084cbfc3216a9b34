multiversx_sc::imports!();

use crate::types::{
    GovernanceParams, PERMISSION_ADMIN, PERMISSION_ALL, PERMISSION_GOVERNOR, PERMISSION_MANAGER,
};

/// Shaman registry: one 3-bit capability mask per address.
///
/// A lock never revokes a bit someone already holds; it only prevents the bit from
/// being granted again.
#[multiversx_sc::module]
pub trait PermissionsModule: crate::config::ConfigModule + crate::events::EventsModule {
    // ========================================================
    // ENDPOINT: setShamans
    // Replaces the mask of every listed address. One locked bit
    // anywhere in the batch rejects the whole call.
    // ========================================================

    #[endpoint(setShamans)]
    fn set_shamans(&self, shamans: MultiValueEncoded<MultiValue2<ManagedAddress, u8>>) {
        self.require_governor();

        for entry in shamans {
            let (shaman, permission) = entry.into_tuple();
            self.set_shaman_permission(&shaman, permission);
        }
    }

    fn set_shaman_permission(&self, shaman: &ManagedAddress, permission: u8) {
        require!(!shaman.is_zero(), "Invalid shaman address");
        require!(permission <= PERMISSION_ALL, "Invalid permission");
        require!(
            !self.admin_locked().get() || permission & PERMISSION_ADMIN == 0,
            "Admin lock engaged"
        );
        require!(
            !self.manager_locked().get() || permission & PERMISSION_MANAGER == 0,
            "Manager lock engaged"
        );
        require!(
            !self.governor_locked().get() || permission & PERMISSION_GOVERNOR == 0,
            "Governor lock engaged"
        );

        self.shaman_permission(shaman).set(permission);
        self.shaman_set_event(shaman, permission);
    }

    // ========================================================
    // ENDPOINTS: one-way locks
    // ========================================================

    #[endpoint(lockAdmin)]
    fn lock_admin(&self) {
        self.require_admin();
        self.engage_lock(PERMISSION_ADMIN);
    }

    #[endpoint(lockManager)]
    fn lock_manager(&self) {
        self.require_manager();
        self.engage_lock(PERMISSION_MANAGER);
    }

    #[endpoint(lockGovernor)]
    fn lock_governor(&self) {
        self.require_governor();
        self.engage_lock(PERMISSION_GOVERNOR);
    }

    fn engage_lock(&self, permission: u8) {
        let lock = match permission {
            PERMISSION_ADMIN => self.admin_locked(),
            PERMISSION_MANAGER => self.manager_locked(),
            _ => self.governor_locked(),
        };
        if lock.get() {
            return;
        }
        lock.set(true);
        self.lock_engaged_event(permission, &self.blockchain().get_caller());
    }

    // ========================================================
    // ENDPOINTS: configuration
    // ========================================================

    #[endpoint(setGovernanceConfig)]
    fn set_governance_config(&self, params: GovernanceParams<Self::Api>) {
        self.require_governor();
        self.apply_governance_params(&params);
    }

    #[endpoint(setAdminConfig)]
    fn set_admin_config(&self, shares_paused: bool, loot_paused: bool) {
        self.require_admin();
        self.apply_admin_config(shares_paused, loot_paused);
    }

    // ========================================================
    // INTERNAL: capability checks
    // ========================================================

    fn has_permission(&self, address: &ManagedAddress, permission: u8) -> bool {
        self.shaman_permission(address).get() & permission != 0
    }

    fn is_admin(&self, address: &ManagedAddress) -> bool {
        self.has_permission(address, PERMISSION_ADMIN)
    }

    fn is_manager(&self, address: &ManagedAddress) -> bool {
        self.has_permission(address, PERMISSION_MANAGER)
    }

    fn is_governor(&self, address: &ManagedAddress) -> bool {
        self.has_permission(address, PERMISSION_GOVERNOR)
    }

    fn require_admin(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            self.is_engine(&caller) || self.is_admin(&caller),
            "Caller is not an admin"
        );
    }

    fn require_manager(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            self.is_engine(&caller) || self.is_manager(&caller),
            "Caller is not a manager"
        );
    }

    fn require_governor(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            self.is_engine(&caller) || self.is_governor(&caller),
            "Caller is not a governor"
        );
    }

    #[view(getShamanPermission)]
    #[storage_mapper("shamanPermission")]
    fn shaman_permission(&self, shaman: &ManagedAddress) -> SingleValueMapper<u8>;
}
