use anchor_lang::prelude::*;

use crate::{
    constants::{FEE_PRECISION, MAX_ADAPTERS},
    errors::VaultError,
    interfaces::AdapterRegistry,
};

/// One entry of an allocation set
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Key the host resolves to the adapter capability
    pub adapter: Pubkey,

    /// Share of deposits routed to this adapter, scaled by `FEE_PRECISION`
    pub allocation: u64,
}

impl AdapterConfig {
    pub const SIZE: usize = 32 + 8;

    pub fn new(adapter: Pubkey, allocation: u64) -> Self {
        Self {
            adapter,
            allocation,
        }
    }
}

/// Validate an allocation set before it is accepted at initialization or
/// proposal time.
///
/// - count within `[1, MAX_ADAPTERS]`
/// - every adapter resolvable, unique, and managing the vault asset
/// - every weight positive, weights summing to exactly 100%
pub fn verify_adapter_config(
    configs: &[AdapterConfig],
    asset_mint: &Pubkey,
    registry: &dyn AdapterRegistry,
) -> Result<()> {
    require!(
        !configs.is_empty() && configs.len() <= MAX_ADAPTERS,
        VaultError::InvalidAdapterCount
    );

    let mut total_allocation: u64 = 0;
    for (index, config) in configs.iter().enumerate() {
        require!(
            !configs[..index].iter().any(|c| c.adapter == config.adapter),
            VaultError::DuplicateAdapter
        );

        let adapter = registry
            .adapter(&config.adapter)
            .ok_or(VaultError::UnknownAdapter)?;
        require_keys_eq!(adapter.asset(), *asset_mint, VaultError::AssetMismatch);

        require!(config.allocation > 0, VaultError::ZeroAllocation);
        total_allocation = total_allocation
            .checked_add(config.allocation)
            .ok_or(VaultError::InvalidAllocationSum)?;
    }

    require!(
        total_allocation == FEE_PRECISION,
        VaultError::InvalidAllocationSum
    );

    Ok(())
}
