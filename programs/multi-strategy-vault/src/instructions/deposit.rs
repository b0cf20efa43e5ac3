use anchor_lang::prelude::*;

use crate::{
    accounting::Snapshot,
    allocation::{allocate_idle, deposit_capacity, mint_capacity},
    constants::FEE_PRECISION,
    errors::VaultError,
    events::Deposit,
    math::{mul_div, Rounding},
    vault::{Env, Vault},
};

impl Vault {
    /// Deposit exact assets and receive shares (floor rounding - favors vault)
    ///
    /// Pulls `assets` from the caller, charges the deposit fee in shares and
    /// allocates the whole idle balance across the adapters. Returns the
    /// shares minted to `receiver`.
    pub fn deposit(&mut self, env: &mut Env<'_>, assets: u64, receiver: Pubkey) -> Result<u64> {
        self.non_reentrant(|vault| vault.process_deposit(env, assets, receiver))
    }

    /// Mint exact shares by depositing the required assets (ceiling rounding - favors vault)
    ///
    /// Returns the assets pulled from the caller.
    pub fn mint(&mut self, env: &mut Env<'_>, shares: u64, receiver: Pubkey) -> Result<u64> {
        self.non_reentrant(|vault| vault.process_mint(env, shares, receiver))
    }

    fn process_deposit(&mut self, env: &mut Env<'_>, assets: u64, receiver: Pubkey) -> Result<u64> {
        // CHECKS
        require!(!self.state.paused, VaultError::VaultPaused);
        require_keys_neq!(receiver, Pubkey::default(), VaultError::InvalidReceiver);
        require!(assets > 0, VaultError::ZeroAmount);

        let snapshot = self.take_fees(env)?;
        require!(
            assets <= self.max_deposit_at(env, &snapshot)?,
            VaultError::MaxDepositExceeded
        );

        let (shares, fee_shares) = self.deposit_shares(assets, &snapshot)?;
        require!(shares > 0, VaultError::ZeroShares);

        self.settle_deposit(env, receiver, assets, shares, fee_shares)?;
        Ok(shares)
    }

    fn process_mint(&mut self, env: &mut Env<'_>, shares: u64, receiver: Pubkey) -> Result<u64> {
        // CHECKS
        require!(!self.state.paused, VaultError::VaultPaused);
        require_keys_neq!(receiver, Pubkey::default(), VaultError::InvalidReceiver);
        require!(shares > 0, VaultError::ZeroAmount);

        let snapshot = self.take_fees(env)?;
        let (assets, fee_shares, gross_shares) = self.mint_cost(shares, &snapshot)?;
        require!(
            gross_shares <= self.max_mint_at(env, &snapshot)?,
            VaultError::MaxMintExceeded
        );
        require!(assets > 0, VaultError::ZeroAmount);

        self.settle_deposit(env, receiver, assets, shares, fee_shares)?;
        Ok(assets)
    }

    fn settle_deposit(
        &mut self,
        env: &mut Env<'_>,
        receiver: Pubkey,
        assets: u64,
        shares: u64,
        fee_shares: u64,
    ) -> Result<()> {
        // EFFECTS: Mint fee and receiver shares
        if fee_shares > 0 {
            self.shares.mint(&self.state.fee_recipient, fee_shares)?;
        }
        self.shares.mint(&receiver, shares)?;

        // INTERACTIONS: Pull assets, then spread idle balance over the adapters
        env.token
            .transfer_from(&self.address, &env.caller, &self.address, assets)?;
        allocate_idle(
            &self.address,
            &self.state.adapters,
            &mut *env.token,
            &mut *env.adapters,
        )?;

        emit!(Deposit {
            vault: self.address,
            caller: env.caller,
            receiver,
            assets,
            shares,
            fee_shares,
        });

        Ok(())
    }

    /// Shares for the depositor and for the fee recipient, both rounded down
    pub(crate) fn deposit_shares(&self, assets: u64, snapshot: &Snapshot) -> Result<(u64, u64)> {
        let fee_assets = mul_div(assets, self.state.fees.deposit, FEE_PRECISION, Rounding::Floor)?;
        let fee_shares = snapshot.convert_to_shares(fee_assets, Rounding::Floor)?;
        let shares = snapshot.convert_to_shares(assets - fee_assets, Rounding::Floor)?;
        Ok((shares, fee_shares))
    }

    /// Assets charged for `shares`, the fee shares minted on top of them and
    /// the gross share amount.
    ///
    /// fee_shares / (shares + fee_shares) is the deposit fee rate; the gross
    /// share amount is priced with ceiling rounding.
    pub(crate) fn mint_cost(&self, shares: u64, snapshot: &Snapshot) -> Result<(u64, u64, u64)> {
        let fee = self.state.fees.deposit;
        let fee_shares = mul_div(shares, fee, FEE_PRECISION - fee, Rounding::Floor)?;
        let gross_shares = shares
            .checked_add(fee_shares)
            .ok_or(VaultError::MathOverflow)?;
        let assets = snapshot.convert_to_assets(gross_shares, Rounding::Ceiling)?;
        Ok((assets, fee_shares, gross_shares))
    }

    /// Zero while paused or at the limit; otherwise the smaller of the
    /// remaining headroom and what the adapters can absorb at their weights
    pub(crate) fn max_deposit_at(&self, env: &Env<'_>, snapshot: &Snapshot) -> Result<u64> {
        if self.state.paused || snapshot.total_assets >= self.state.deposit_limit {
            return Ok(0);
        }

        let headroom = self.state.deposit_limit - snapshot.total_assets;
        let capacity = deposit_capacity(&self.address, &self.state.adapters, &*env.adapters)?;
        Ok(headroom.min(capacity))
    }

    pub(crate) fn max_mint_at(&self, env: &Env<'_>, snapshot: &Snapshot) -> Result<u64> {
        let max_assets = self.max_deposit_at(env, snapshot)?;
        if max_assets == 0 {
            return Ok(0);
        }

        let max_assets = max_assets.min(mint_capacity(
            &self.address,
            &self.state.adapters,
            &*env.adapters,
        )?);
        if max_assets == u64::MAX {
            return Ok(u64::MAX);
        }

        snapshot.convert_to_shares_saturating(max_assets, Rounding::Floor)
    }
}
