use anchor_lang::prelude::*;

use crate::{
    adapters::AdapterConfig,
    math::Rounding,
    state::VaultFees,
    vault::{Env, Vault},
};

// Amount views are evaluated against the state the next operation in the
// same transaction would see, i.e. after pending fees are settled.
impl Vault {
    /// Idle balance plus the redeemable value of every adapter position
    pub fn total_assets(&self, env: &Env<'_>) -> Result<u64> {
        Ok(self.snapshot(env)?.total_assets)
    }

    pub fn convert_to_shares(&self, env: &Env<'_>, assets: u64) -> Result<u64> {
        self.projected_snapshot(env)?
            .convert_to_shares(assets, Rounding::Floor)
    }

    pub fn convert_to_assets(&self, env: &Env<'_>, shares: u64) -> Result<u64> {
        self.projected_snapshot(env)?
            .convert_to_assets(shares, Rounding::Floor)
    }

    /// Shares `deposit(assets)` would mint to the receiver
    pub fn preview_deposit(&self, env: &Env<'_>, assets: u64) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        let (shares, _) = self.deposit_shares(assets, &snapshot)?;
        Ok(shares)
    }

    /// Assets `mint(shares)` would pull from the caller
    pub fn preview_mint(&self, env: &Env<'_>, shares: u64) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        let (assets, ..) = self.mint_cost(shares, &snapshot)?;
        Ok(assets)
    }

    /// Shares `withdraw(assets)` would burn from the owner
    pub fn preview_withdraw(&self, env: &Env<'_>, assets: u64) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.withdraw_shares(assets, &snapshot)
    }

    /// Assets `redeem(shares)` would pay out
    pub fn preview_redeem(&self, env: &Env<'_>, shares: u64) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.redeem_assets(shares, &snapshot)
    }

    pub fn max_deposit(&self, env: &Env<'_>, _receiver: &Pubkey) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.max_deposit_at(env, &snapshot)
    }

    pub fn max_mint(&self, env: &Env<'_>, _receiver: &Pubkey) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.max_mint_at(env, &snapshot)
    }

    pub fn max_withdraw(&self, env: &Env<'_>, owner: &Pubkey) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.max_withdraw_at(owner, &snapshot)
    }

    pub fn max_redeem(&self, env: &Env<'_>, owner: &Pubkey) -> Result<u64> {
        let snapshot = self.projected_snapshot(env)?;
        self.max_redeem_at(owner, &snapshot)
    }

    /// Management fee accrued since the last checkpoint, in assets
    pub fn accrued_management_fee(&self, env: &Env<'_>) -> Result<u64> {
        let snapshot = self.snapshot(env)?;
        Ok(self.assess_fees(&snapshot, env.now)?.accrued.management)
    }

    /// Performance fee on share value above the high-water mark, in assets
    pub fn accrued_performance_fee(&self, env: &Env<'_>) -> Result<u64> {
        let snapshot = self.snapshot(env)?;
        Ok(self.assess_fees(&snapshot, env.now)?.accrued.performance)
    }

    /// Current share value before fee settlement, comparable to the high-water mark
    pub fn share_value(&self, env: &Env<'_>) -> Result<u64> {
        self.snapshot(env)?.share_value()
    }
}

impl Vault {
    pub fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.shares.balance_of(holder)
    }

    pub fn total_supply(&self) -> u64 {
        self.shares.total_supply()
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.shares.allowance(owner, spender)
    }

    pub fn nonce(&self, owner: &Pubkey) -> u64 {
        self.shares.nonce(owner)
    }

    pub fn asset(&self) -> Pubkey {
        self.state.asset_mint
    }

    pub fn decimals(&self) -> u8 {
        self.state.decimals
    }

    pub fn owner(&self) -> Pubkey {
        self.state.owner
    }

    pub fn nominated_owner(&self) -> Option<Pubkey> {
        (self.state.nominated_owner != Pubkey::default()).then_some(self.state.nominated_owner)
    }

    pub fn fees(&self) -> VaultFees {
        self.state.fees
    }

    /// Pending fee schedule and the time it was proposed
    pub fn proposed_fees(&self) -> Option<(VaultFees, i64)> {
        let fees = *self.state.proposed_fees.payload()?;
        Some((fees, self.state.proposed_fees.proposed_at()?))
    }

    pub fn fee_recipient(&self) -> Pubkey {
        self.state.fee_recipient
    }

    pub fn adapters(&self) -> &[AdapterConfig] {
        &self.state.adapters
    }

    /// Pending allocation set and the time it was proposed
    pub fn proposed_adapters(&self) -> Option<(&[AdapterConfig], i64)> {
        let adapters = self.state.proposed_adapters.payload()?;
        Some((adapters.as_slice(), self.state.proposed_adapters.proposed_at()?))
    }

    pub fn high_water_mark(&self) -> u64 {
        self.state.high_water_mark
    }

    pub fn fees_updated_at(&self) -> i64 {
        self.state.fees_updated_at
    }

    pub fn deposit_limit(&self) -> u64 {
        self.state.deposit_limit
    }

    pub fn quit_period(&self) -> i64 {
        self.state.quit_period
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }
}
