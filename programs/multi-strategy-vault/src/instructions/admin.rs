use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_QUIT_PERIOD, MIN_QUIT_PERIOD},
    errors::VaultError,
    events::*,
    vault::{Env, Vault},
};

impl Vault {
    pub fn set_fee_recipient(&mut self, env: &mut Env<'_>, fee_recipient: Pubkey) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        require_keys_neq!(fee_recipient, Pubkey::default(), VaultError::InvalidFeeRecipient);

        let old_fee_recipient = std::mem::replace(&mut self.state.fee_recipient, fee_recipient);

        emit!(FeeRecipientUpdated {
            vault: self.address,
            old_fee_recipient,
            new_fee_recipient: fee_recipient,
        });
        Ok(())
    }

    /// Set the ceiling on total managed assets. Lowering it below the current
    /// total only blocks new deposits.
    pub fn set_deposit_limit(&mut self, env: &mut Env<'_>, deposit_limit: u64) -> Result<()> {
        self.state.require_owner(&env.caller)?;

        let old_limit = std::mem::replace(&mut self.state.deposit_limit, deposit_limit);

        emit!(DepositLimitUpdated {
            vault: self.address,
            old_limit,
            new_limit: deposit_limit,
        });
        Ok(())
    }

    /// Refused while a fee or adapter proposal is still inside its quit period,
    /// so an announced change never becomes due earlier than promised
    pub fn set_quit_period(&mut self, env: &mut Env<'_>, quit_period: i64) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        require!(
            (MIN_QUIT_PERIOD..=MAX_QUIT_PERIOD).contains(&quit_period),
            VaultError::InvalidQuitPeriod
        );

        let current = self.state.quit_period;
        require!(
            !self.state.proposed_fees.in_quit_period(env.now, current)
                && !self.state.proposed_adapters.in_quit_period(env.now, current),
            VaultError::QuitPeriodNotElapsed
        );

        let old_period = std::mem::replace(&mut self.state.quit_period, quit_period);

        emit!(QuitPeriodUpdated {
            vault: self.address,
            old_period,
            new_period: quit_period,
        });
        Ok(())
    }

    /// Close the deposit path. Withdrawals stay available.
    pub fn pause(&mut self, env: &mut Env<'_>) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        require!(!self.state.paused, VaultError::VaultPaused);

        self.state.paused = true;

        emit!(VaultStatusChanged {
            vault: self.address,
            paused: true,
        });
        msg!("Vault {} paused", self.address);
        Ok(())
    }

    pub fn unpause(&mut self, env: &mut Env<'_>) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        require!(self.state.paused, VaultError::VaultNotPaused);

        self.state.paused = false;

        emit!(VaultStatusChanged {
            vault: self.address,
            paused: false,
        });
        msg!("Vault {} unpaused", self.address);
        Ok(())
    }

    /// First step of an ownership transfer. Nominating the null identity
    /// cancels a pending nomination.
    pub fn nominate_new_owner(&mut self, env: &mut Env<'_>, nominee: Pubkey) -> Result<()> {
        self.state.require_owner(&env.caller)?;

        self.state.nominated_owner = nominee;

        emit!(OwnerNominated {
            vault: self.address,
            nominee,
        });
        Ok(())
    }

    pub fn accept_ownership(&mut self, env: &mut Env<'_>) -> Result<()> {
        require!(
            self.state.nominated_owner != Pubkey::default()
                && self.state.nominated_owner == env.caller,
            VaultError::NotNominated
        );

        let previous_owner = std::mem::replace(&mut self.state.owner, env.caller);
        self.state.nominated_owner = Pubkey::default();

        emit!(OwnershipTransferred {
            vault: self.address,
            previous_owner,
            new_owner: env.caller,
        });
        Ok(())
    }
}
