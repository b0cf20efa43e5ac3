use anchor_lang::prelude::*;

use crate::{
    adapters::{verify_adapter_config, AdapterConfig},
    allocation::set_approvals,
    constants::*,
    errors::*,
    events::*,
    ledger::ShareLedger,
    state::*,
    vault::{Env, Vault},
};

/// Configuration a vault is created with
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    /// Distinguishes several vaults over the same asset
    pub vault_id: u64,
    pub adapters: Vec<AdapterConfig>,
    pub fees: VaultFees,
    pub fee_recipient: Pubkey,
    pub deposit_limit: u64,
    pub owner: Pubkey,
}

impl Vault {
    /// Initialize a new vault over the asset of `env.token`
    ///
    /// - Validates owner, fee recipient, fee schedule and adapter set
    /// - Derives the vault address from asset and vault id
    /// - Grants every adapter an unlimited allowance on the vault's assets
    pub fn initialize(env: &mut Env<'_>, params: InitializeParams) -> Result<Vault> {
        // CHECKS: Validate configuration
        require_keys_neq!(params.owner, Pubkey::default(), VaultError::InvalidOwner);
        require_keys_neq!(
            params.fee_recipient,
            Pubkey::default(),
            VaultError::InvalidFeeRecipient
        );
        params.fees.validate()?;

        let asset_mint = env.token.mint();
        verify_adapter_config(&params.adapters, &asset_mint, &*env.adapters)?;

        let decimals = env
            .token
            .decimals()
            .checked_add(DECIMALS_OFFSET)
            .ok_or(VaultError::MathOverflow)?;
        let (address, bump) = VaultState::derive_address(&asset_mint, params.vault_id);

        // EFFECTS: Initialize vault state
        let state = VaultState {
            owner: params.owner,
            nominated_owner: Pubkey::default(),
            asset_mint,
            vault_id: params.vault_id,
            decimals,
            adapters: params.adapters,
            proposed_adapters: PendingChange::None,
            fees: params.fees,
            proposed_fees: PendingChange::None,
            fee_recipient: params.fee_recipient,
            high_water_mark: HIGH_WATER_MARK_GENESIS,
            fees_updated_at: env.now,
            quit_period: DEFAULT_QUIT_PERIOD,
            deposit_limit: params.deposit_limit,
            paused: false,
            locked: false,
            bump,
        };

        // INTERACTIONS: Approve adapters
        set_approvals(&address, &state.adapters, &mut *env.token, u64::MAX)?;

        emit!(VaultInitialized {
            vault: address,
            owner: state.owner,
            asset_mint,
            adapters: state.adapters.clone(),
            fees: state.fees,
            fee_recipient: state.fee_recipient,
            deposit_limit: state.deposit_limit,
            timestamp: env.now,
        });

        msg!(
            "Vault {} initialized for asset {} with {} adapters",
            address,
            asset_mint,
            state.adapters.len()
        );

        Ok(Vault::from_parts(address, state, ShareLedger::default()))
    }
}
