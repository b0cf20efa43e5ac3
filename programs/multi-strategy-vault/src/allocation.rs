use anchor_lang::prelude::*;

use crate::{
    adapters::AdapterConfig,
    constants::{DUST_THRESHOLD, FEE_PRECISION},
    errors::VaultError,
    interfaces::{AdapterRegistry, AssetToken},
    math::{mul_div, saturating_mul_div, Rounding},
};

/// Distribute the vault's entire idle balance across the set by weight.
///
/// Each share is clamped to what the adapter will currently accept. Amounts
/// below `DUST_THRESHOLD` stay idle so adapters are never asked to mint zero
/// shares. Rounding remainders and clamped excess stay idle as well.
pub fn allocate_idle(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    token: &mut dyn AssetToken,
    registry: &mut dyn AdapterRegistry,
) -> Result<()> {
    let idle = token.balance_of(vault);
    if idle == 0 {
        return Ok(());
    }

    for config in adapters {
        let adapter = registry
            .adapter_mut(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;

        let amount = mul_div(idle, config.allocation, FEE_PRECISION, Rounding::Floor)?
            .min(adapter.max_deposit(vault));
        if amount < DUST_THRESHOLD {
            msg!("Skipping dust allocation of {} to {}", amount, config.adapter);
            continue;
        }

        adapter.deposit(token, vault, amount, vault)?;
    }

    Ok(())
}

/// Redeem from every adapter the fraction `shares / total_supply` of the
/// vault's position, rounded up so the vault never under-redeems.
pub fn deallocate(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    token: &mut dyn AssetToken,
    registry: &mut dyn AdapterRegistry,
    shares: u64,
    total_supply: u64,
) -> Result<()> {
    require!(total_supply > 0, VaultError::DivisionByZero);

    for config in adapters {
        let adapter = registry
            .adapter_mut(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;

        let position = adapter.balance_of(vault);
        let to_redeem = mul_div(position, shares, total_supply, Rounding::Ceiling)?.min(position);
        if to_redeem > 0 {
            adapter.redeem(token, to_redeem, vault, vault)?;
        }
    }

    Ok(())
}

/// Redeem the vault's whole position from every adapter back to idle
pub fn redeem_all(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    token: &mut dyn AssetToken,
    registry: &mut dyn AdapterRegistry,
) -> Result<()> {
    for config in adapters {
        let adapter = registry
            .adapter_mut(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;

        let position = adapter.balance_of(vault);
        if position > 0 {
            adapter.redeem(token, position, vault, vault)?;
        }
    }

    Ok(())
}

/// Set the vault's asset allowance for every adapter in the set
pub fn set_approvals(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    token: &mut dyn AssetToken,
    amount: u64,
) -> Result<()> {
    for config in adapters {
        token.approve(vault, &config.adapter, amount)?;
    }
    Ok(())
}

/// Largest deposit every adapter can absorb at its weight.
///
/// Each adapter's own `max_deposit` is scaled back through the inverse of its
/// weight; `u64::MAX` means no adapter imposes a bound.
pub fn deposit_capacity(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    registry: &dyn AdapterRegistry,
) -> Result<u64> {
    let mut capacity = u64::MAX;

    for config in adapters {
        let adapter = registry
            .adapter(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;

        let adapter_max = adapter.max_deposit(vault);
        if adapter_max != u64::MAX {
            let scaled =
                saturating_mul_div(adapter_max, FEE_PRECISION, config.allocation, Rounding::Floor)?;
            capacity = capacity.min(scaled);
        }
    }

    Ok(capacity)
}

/// Largest deposit, in assets, the adapters' share-minting limits allow.
///
/// Each adapter's `max_mint` is valued through its own `preview_redeem` and
/// scaled back through the inverse of its weight.
pub fn mint_capacity(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    registry: &dyn AdapterRegistry,
) -> Result<u64> {
    let mut capacity = u64::MAX;

    for config in adapters {
        let adapter = registry
            .adapter(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;

        let adapter_max = adapter.max_mint(vault);
        if adapter_max != u64::MAX {
            let assets = adapter.preview_redeem(adapter_max)?;
            let scaled =
                saturating_mul_div(assets, FEE_PRECISION, config.allocation, Rounding::Floor)?;
            capacity = capacity.min(scaled);
        }
    }

    Ok(capacity)
}
