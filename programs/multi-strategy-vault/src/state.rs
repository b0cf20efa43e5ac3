use anchor_lang::prelude::*;

use crate::{
    adapters::AdapterConfig,
    constants::{FEE_PRECISION, MAX_ADAPTERS},
    errors::VaultError,
};

/// Fee schedule, each rate a fixed-point fraction scaled by `FEE_PRECISION`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultFees {
    /// Charged on deposit/mint, taken in shares
    pub deposit: u64,
    /// Charged on withdraw/redeem, taken in shares
    pub withdrawal: u64,
    /// Annual rate on total managed assets
    pub management: u64,
    /// Rate on share value gains above the high-water mark
    pub performance: u64,
}

impl VaultFees {
    /// Every rate must be strictly below 100%
    pub fn validate(&self) -> Result<()> {
        require!(
            self.deposit < FEE_PRECISION
                && self.withdrawal < FEE_PRECISION
                && self.management < FEE_PRECISION
                && self.performance < FEE_PRECISION,
            VaultError::InvalidFees
        );
        Ok(())
    }
}

/// A change that may only be committed once the quit period has passed
/// since it was proposed. Committing is permissionless.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum PendingChange<T> {
    None,
    Pending { proposed_at: i64, payload: T },
}

impl<T> Default for PendingChange<T> {
    fn default() -> Self {
        PendingChange::None
    }
}

impl<T> PendingChange<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, PendingChange::Pending { .. })
    }

    pub fn proposed_at(&self) -> Option<i64> {
        match self {
            PendingChange::Pending { proposed_at, .. } => Some(*proposed_at),
            PendingChange::None => None,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            PendingChange::Pending { payload, .. } => Some(payload),
            PendingChange::None => None,
        }
    }

    /// Due once `now >= proposed_at + quit_period`. Never due without a proposal.
    pub fn is_due(&self, now: i64, quit_period: i64) -> bool {
        match self {
            PendingChange::Pending { proposed_at, .. } => {
                now >= proposed_at.saturating_add(quit_period)
            }
            PendingChange::None => false,
        }
    }

    /// Pending and still inside its quit period
    pub fn in_quit_period(&self, now: i64, quit_period: i64) -> bool {
        self.is_pending() && !self.is_due(now, quit_period)
    }

    /// Take the payload out if it is due, leaving `None` behind.
    /// On failure the pending change is left untouched.
    pub fn take_due(&mut self, now: i64, quit_period: i64) -> Result<T> {
        require!(self.is_pending(), VaultError::NoPendingChange);
        require!(self.is_due(now, quit_period), VaultError::QuitPeriodNotElapsed);

        match std::mem::replace(self, PendingChange::None) {
            PendingChange::Pending { payload, .. } => Ok(payload),
            PendingChange::None => err!(VaultError::NoPendingChange),
        }
    }
}

/// Global vault state
///
/// The share ledger lives beside it (see `ledger::ShareLedger`); everything
/// here is accounting and governance configuration.
#[account]
pub struct VaultState {
    /// Owner that can propose changes and manage limits
    pub owner: Pubkey,

    /// Owner nominated through `nominate_new_owner`, if any
    pub nominated_owner: Pubkey,

    /// Mint of the underlying asset token
    pub asset_mint: Pubkey,

    /// Unique vault identifier (allows multiple vaults per asset)
    pub vault_id: u64,

    /// Decimals of the share token: asset decimals + `DECIMALS_OFFSET`
    pub decimals: u8,

    /// Active allocation set, weights sum to `FEE_PRECISION`
    pub adapters: Vec<AdapterConfig>,

    /// Replacement allocation set awaiting its quit period
    pub proposed_adapters: PendingChange<Vec<AdapterConfig>>,

    /// Live fee schedule
    pub fees: VaultFees,

    /// Replacement fee schedule awaiting its quit period
    pub proposed_fees: PendingChange<VaultFees>,

    /// Receives every fee share
    pub fee_recipient: Pubkey,

    /// Highest observed share value
    pub high_water_mark: u64,

    /// Timestamp of the last fee checkpoint
    pub fees_updated_at: i64,

    /// Delay between a proposal and its commit
    pub quit_period: i64,

    /// Ceiling on total managed assets
    pub deposit_limit: u64,

    /// Deposit-path circuit breaker; exits stay open
    pub paused: bool,

    /// Reentrancy guard, set for the duration of a guarded operation
    pub locked: bool,

    /// Bump seed of the vault address
    pub bump: u8,
}

impl VaultState {
    /// Space calculation with a full adapter set and full proposal
    /// 8 (discriminator) + 3 * 32 (keys) + 8 (vault_id) + 1 (decimals)
    /// + 4 + 10 * 40 (adapters) + 1 + 8 + 4 + 10 * 40 (proposed adapters)
    /// + 32 (fees) + 1 + 8 + 32 (proposed fees) + 32 (fee_recipient)
    /// + 8 + 8 + 8 + 8 (hwm, fees_updated_at, quit_period, deposit_limit)
    /// + 3 (paused, locked, bump)
    pub const SPACE: usize = 8
        + 3 * 32
        + 8
        + 1
        + 4
        + MAX_ADAPTERS * AdapterConfig::SIZE
        + 1
        + 8
        + 4
        + MAX_ADAPTERS * AdapterConfig::SIZE
        + 32
        + 1
        + 8
        + 32
        + 32
        + 4 * 8
        + 3;

    /// Derive the vault address for an asset and vault id
    pub fn derive_address(asset_mint: &Pubkey, vault_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                crate::constants::VAULT_SEED,
                asset_mint.as_ref(),
                &vault_id.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, VaultError::Unauthorized);
        Ok(())
    }
}
