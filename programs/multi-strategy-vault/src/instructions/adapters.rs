use anchor_lang::prelude::*;

use crate::{
    adapters::{verify_adapter_config, AdapterConfig},
    allocation::{allocate_idle, redeem_all, set_approvals},
    events::{AdaptersChanged, AdaptersProposed},
    state::PendingChange,
    vault::{Env, Vault},
};

impl Vault {
    /// Propose a replacement allocation set (owner only)
    pub fn propose_adapters(&mut self, env: &mut Env<'_>, adapters: Vec<AdapterConfig>) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        verify_adapter_config(&adapters, &self.state.asset_mint, &*env.adapters)?;

        emit!(AdaptersProposed {
            vault: self.address,
            proposed_adapters: adapters.clone(),
            timestamp: env.now,
        });

        self.state.proposed_adapters = PendingChange::Pending {
            proposed_at: env.now,
            payload: adapters,
        };
        Ok(())
    }

    /// Migrate to the proposed allocation set. Callable by anyone once due.
    ///
    /// 1. Settle fees against the old allocation
    /// 2. Redeem every position in the old set back to idle
    /// 3. Revoke the old adapters' allowances
    /// 4. Install the new set and approve it
    /// 5. Redistribute the idle balance by the new weights
    pub fn change_adapters(&mut self, env: &mut Env<'_>) -> Result<()> {
        self.non_reentrant(|vault| vault.process_change_adapters(env))
    }

    fn process_change_adapters(&mut self, env: &mut Env<'_>) -> Result<()> {
        let new_adapters = self
            .state
            .proposed_adapters
            .take_due(env.now, self.state.quit_period)?;

        self.take_fees(env)?;

        redeem_all(
            &self.address,
            &self.state.adapters,
            &mut *env.token,
            &mut *env.adapters,
        )?;
        set_approvals(&self.address, &self.state.adapters, &mut *env.token, 0)?;

        let old_adapters = std::mem::replace(&mut self.state.adapters, new_adapters);

        set_approvals(&self.address, &self.state.adapters, &mut *env.token, u64::MAX)?;
        allocate_idle(
            &self.address,
            &self.state.adapters,
            &mut *env.token,
            &mut *env.adapters,
        )?;

        msg!(
            "Vault {} migrated from {} to {} adapters",
            self.address,
            old_adapters.len(),
            self.state.adapters.len()
        );

        emit!(AdaptersChanged {
            vault: self.address,
            old_adapters,
            new_adapters: self.state.adapters.clone(),
            timestamp: env.now,
        });
        Ok(())
    }
}
