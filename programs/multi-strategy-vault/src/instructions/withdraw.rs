use anchor_lang::prelude::*;

use crate::{
    accounting::Snapshot,
    allocation::deallocate,
    constants::FEE_PRECISION,
    errors::VaultError,
    events::Withdraw,
    math::{mul_div, Rounding},
    vault::{Env, Vault},
};

impl Vault {
    /// Withdraw exact assets by burning shares (ceiling rounding - favors vault)
    ///
    /// Available while paused. A caller other than `owner` spends the owner's
    /// share allowance. Returns the shares burned from `owner`.
    pub fn withdraw(
        &mut self,
        env: &mut Env<'_>,
        assets: u64,
        receiver: Pubkey,
        owner: Pubkey,
    ) -> Result<u64> {
        self.non_reentrant(|vault| vault.process_withdraw(env, assets, receiver, owner))
    }

    /// Redeem exact shares for assets (floor rounding - favors vault)
    ///
    /// Returns the assets paid to `receiver`.
    pub fn redeem(
        &mut self,
        env: &mut Env<'_>,
        shares: u64,
        receiver: Pubkey,
        owner: Pubkey,
    ) -> Result<u64> {
        self.non_reentrant(|vault| vault.process_redeem(env, shares, receiver, owner))
    }

    fn process_withdraw(
        &mut self,
        env: &mut Env<'_>,
        assets: u64,
        receiver: Pubkey,
        owner: Pubkey,
    ) -> Result<u64> {
        // CHECKS
        require_keys_neq!(receiver, Pubkey::default(), VaultError::InvalidReceiver);
        require_keys_neq!(owner, Pubkey::default(), VaultError::InvalidOwner);
        require!(assets > 0, VaultError::ZeroAmount);

        let snapshot = self.take_fees(env)?;
        require!(
            assets <= self.max_withdraw_at(&owner, &snapshot)?,
            VaultError::MaxWithdrawExceeded
        );

        let shares = self.withdraw_shares(assets, &snapshot)?;
        let fee_shares = self.withdrawal_fee_shares(shares)?;

        self.settle_withdraw(env, &snapshot, receiver, owner, assets, shares, fee_shares)?;
        Ok(shares)
    }

    fn process_redeem(
        &mut self,
        env: &mut Env<'_>,
        shares: u64,
        receiver: Pubkey,
        owner: Pubkey,
    ) -> Result<u64> {
        // CHECKS
        require_keys_neq!(receiver, Pubkey::default(), VaultError::InvalidReceiver);
        require_keys_neq!(owner, Pubkey::default(), VaultError::InvalidOwner);
        require!(shares > 0, VaultError::ZeroAmount);

        let snapshot = self.take_fees(env)?;
        require!(
            shares <= self.max_redeem_at(&owner, &snapshot)?,
            VaultError::MaxRedeemExceeded
        );

        let assets = self.redeem_assets(shares, &snapshot)?;
        require!(assets > 0, VaultError::ZeroAmount);
        let fee_shares = self.withdrawal_fee_shares(shares)?;

        self.settle_withdraw(env, &snapshot, receiver, owner, assets, shares, fee_shares)?;
        Ok(assets)
    }

    #[allow(clippy::too_many_arguments)]
    fn settle_withdraw(
        &mut self,
        env: &mut Env<'_>,
        snapshot: &Snapshot,
        receiver: Pubkey,
        owner: Pubkey,
        assets: u64,
        shares: u64,
        fee_shares: u64,
    ) -> Result<()> {
        // EFFECTS: Spend allowance, burn owner shares, credit the fee recipient
        if env.caller != owner {
            self.shares.spend_allowance(&owner, &env.caller, shares)?;
        }
        self.shares.burn(&owner, shares)?;
        if fee_shares > 0 {
            self.shares.mint(&self.state.fee_recipient, fee_shares)?;
        }

        // INTERACTIONS: Pull the proportional slice out of every adapter, then pay out
        deallocate(
            &self.address,
            &self.state.adapters,
            &mut *env.token,
            &mut *env.adapters,
            shares,
            snapshot.total_supply,
        )?;
        env.token.transfer(&self.address, &receiver, assets)?;

        emit!(Withdraw {
            vault: self.address,
            caller: env.caller,
            receiver,
            owner,
            assets,
            shares,
            fee_shares,
        });

        Ok(())
    }

    /// Shares to burn for `assets` net of the withdrawal fee
    ///
    /// gross = assets + ceil(assets × fee / (1 - fee)), converted with ceiling
    pub(crate) fn withdraw_shares(&self, assets: u64, snapshot: &Snapshot) -> Result<u64> {
        let fee = self.state.fees.withdrawal;
        let fee_assets = mul_div(assets, fee, FEE_PRECISION - fee, Rounding::Ceiling)?;
        let gross = assets
            .checked_add(fee_assets)
            .ok_or(VaultError::MathOverflow)?;
        snapshot.convert_to_shares(gross, Rounding::Ceiling)
    }

    /// Assets paid for `shares` after the withdrawal fee
    pub(crate) fn redeem_assets(&self, shares: u64, snapshot: &Snapshot) -> Result<u64> {
        let gross = snapshot.convert_to_assets(shares, Rounding::Floor)?;
        let fee_assets = mul_div(gross, self.state.fees.withdrawal, FEE_PRECISION, Rounding::Ceiling)?;
        Ok(gross - fee_assets)
    }

    pub(crate) fn withdrawal_fee_shares(&self, shares: u64) -> Result<u64> {
        mul_div(shares, self.state.fees.withdrawal, FEE_PRECISION, Rounding::Floor)
    }

    pub(crate) fn max_withdraw_at(&self, owner: &Pubkey, snapshot: &Snapshot) -> Result<u64> {
        let balance = self.shares.balance_of(owner);
        Ok(self
            .redeem_assets(balance, snapshot)?
            .min(snapshot.total_assets))
    }

    /// The owner's balance, unless it is worth more than the vault holds, in
    /// which case the shares needed to withdraw everything.
    ///
    /// With virtual shares in the conversion, `balance <= total_supply` keeps
    /// the balance's value at or below `total_assets`, so the fallback only
    /// bounds states the ledger cannot produce.
    pub(crate) fn max_redeem_at(&self, owner: &Pubkey, snapshot: &Snapshot) -> Result<u64> {
        let balance = self.shares.balance_of(owner);
        if snapshot.convert_to_assets(balance, Rounding::Floor)? > snapshot.total_assets {
            return self.withdraw_shares(snapshot.total_assets, snapshot);
        }
        Ok(balance)
    }
}
