use anchor_lang::prelude::*;

use crate::{adapters::AdapterConfig, state::VaultFees};

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub asset_mint: Pubkey,
    pub adapters: Vec<AdapterConfig>,
    pub fees: VaultFees,
    pub fee_recipient: Pubkey,
    pub deposit_limit: u64,
    pub timestamp: i64,
}

/// Event emitted on deposit and mint
#[event]
pub struct Deposit {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub assets: u64,
    pub shares: u64,
    pub fee_shares: u64,
}

/// Event emitted on withdraw and redeem
#[event]
pub struct Withdraw {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
    pub fee_shares: u64,
}

/// Event emitted when management/performance fees are realized
#[event]
pub struct FeesTaken {
    pub vault: Pubkey,
    pub fee_recipient: Pubkey,
    pub management_fee: u64,
    pub performance_fee: u64,
    pub fee_shares: u64,
    pub high_water_mark: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesProposed {
    pub vault: Pubkey,
    pub proposed_fees: VaultFees,
    pub timestamp: i64,
}

#[event]
pub struct FeesChanged {
    pub vault: Pubkey,
    pub old_fees: VaultFees,
    pub new_fees: VaultFees,
    pub timestamp: i64,
}

#[event]
pub struct AdaptersProposed {
    pub vault: Pubkey,
    pub proposed_adapters: Vec<AdapterConfig>,
    pub timestamp: i64,
}

#[event]
pub struct AdaptersChanged {
    pub vault: Pubkey,
    pub old_adapters: Vec<AdapterConfig>,
    pub new_adapters: Vec<AdapterConfig>,
    pub timestamp: i64,
}

#[event]
pub struct FeeRecipientUpdated {
    pub vault: Pubkey,
    pub old_fee_recipient: Pubkey,
    pub new_fee_recipient: Pubkey,
}

#[event]
pub struct DepositLimitUpdated {
    pub vault: Pubkey,
    pub old_limit: u64,
    pub new_limit: u64,
}

#[event]
pub struct QuitPeriodUpdated {
    pub vault: Pubkey,
    pub old_period: i64,
    pub new_period: i64,
}

#[event]
pub struct VaultStatusChanged {
    pub vault: Pubkey,
    pub paused: bool,
}

#[event]
pub struct OwnerNominated {
    pub vault: Pubkey,
    pub nominee: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub vault: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct SharesTransferred {
    pub vault: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub shares: u64,
}

#[event]
pub struct SharesApproved {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub shares: u64,
}
