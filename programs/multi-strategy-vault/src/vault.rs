use anchor_lang::prelude::*;

use crate::{
    accounting::{self, Snapshot},
    errors::VaultError,
    fees::{self, AccruedFees},
    interfaces::{AdapterRegistry, AssetToken},
    ledger::ShareLedger,
    state::VaultState,
};

/// Everything an operation needs from the host: who is calling, when, and
/// the collaborators the vault talks to.
pub struct Env<'a> {
    pub caller: Pubkey,
    pub now: i64,
    pub token: &'a mut dyn AssetToken,
    pub adapters: &'a mut dyn AdapterRegistry,
}

/// A deployed vault: its address, persisted state, and share ledger.
///
/// Operations live in `instructions/`, one file per concern, each adding an
/// `impl Vault` block.
#[derive(Clone)]
pub struct Vault {
    pub(crate) address: Pubkey,
    pub(crate) state: VaultState,
    pub(crate) shares: ShareLedger,
}

/// Outcome of evaluating the fee streams against a snapshot
#[derive(Clone, Copy, Debug)]
pub(crate) struct FeeAssessment {
    pub accrued: AccruedFees,
    pub share_value: u64,
    pub fee_shares: u64,
}

impl Vault {
    /// Rebuild a vault from previously persisted parts
    pub fn from_parts(address: Pubkey, state: VaultState, shares: ShareLedger) -> Self {
        Self {
            address,
            state,
            shares,
        }
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    pub fn shares(&self) -> &ShareLedger {
        &self.shares
    }

    /// Run `op` as a guarded region.
    ///
    /// Nested entry fails with `Reentrancy`. The lock is released on every
    /// exit, and on failure the vault's own state and ledger are restored.
    pub(crate) fn non_reentrant<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        require!(!self.state.locked, VaultError::Reentrancy);

        let checkpoint = (self.state.clone(), self.shares.clone());
        self.state.locked = true;

        let result = op(self);
        if result.is_ok() {
            self.state.locked = false;
        } else {
            (self.state, self.shares) = checkpoint;
        }
        result
    }

    /// Read total managed assets once, together with the share supply
    pub(crate) fn snapshot(&self, env: &Env<'_>) -> Result<Snapshot> {
        let total_assets = accounting::total_managed_assets(
            &self.address,
            &self.state.adapters,
            &*env.token,
            &*env.adapters,
        )?;

        Ok(Snapshot {
            total_assets,
            total_supply: self.shares.total_supply(),
        })
    }

    pub(crate) fn assess_fees(&self, snapshot: &Snapshot, now: i64) -> Result<FeeAssessment> {
        let elapsed = now.saturating_sub(self.state.fees_updated_at);
        let management =
            fees::management_fee(self.state.fees.management, snapshot.total_assets, elapsed)?;

        let share_value = snapshot.share_value()?;
        let performance = fees::performance_fee(
            self.state.fees.performance,
            share_value,
            self.state.high_water_mark,
            snapshot.total_supply,
        )?;

        let accrued = AccruedFees {
            management,
            performance,
        };
        let fee_shares = fees::fee_shares(accrued.total()?, snapshot)?;

        Ok(FeeAssessment {
            accrued,
            share_value,
            fee_shares,
        })
    }

    /// Snapshot as the next operation in this transaction would see it,
    /// i.e. after pending fees are settled
    pub(crate) fn projected_snapshot(&self, env: &Env<'_>) -> Result<Snapshot> {
        let snapshot = self.snapshot(env)?;
        let assessment = self.assess_fees(&snapshot, env.now)?;
        snapshot.with_minted(assessment.fee_shares)
    }
}
