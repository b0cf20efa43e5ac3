use anchor_lang::prelude::*;

use crate::{
    adapters::AdapterConfig,
    constants::ONE_SHARE,
    errors::VaultError,
    interfaces::{AdapterRegistry, AssetToken},
    math::{self, Rounding},
};

/// Total managed assets and share supply observed once per operation.
///
/// Every conversion inside one operation goes through the same snapshot so
/// the exchange rate cannot drift between reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub total_assets: u64,
    pub total_supply: u64,
}

impl Snapshot {
    pub fn convert_to_shares(&self, assets: u64, rounding: Rounding) -> Result<u64> {
        math::convert_to_shares(assets, self.total_assets, self.total_supply, rounding)
    }

    pub fn convert_to_assets(&self, shares: u64, rounding: Rounding) -> Result<u64> {
        math::convert_to_assets(shares, self.total_assets, self.total_supply, rounding)
    }

    pub fn convert_to_shares_saturating(&self, assets: u64, rounding: Rounding) -> Result<u64> {
        math::convert_to_shares_saturating(assets, self.total_assets, self.total_supply, rounding)
    }

    /// Assets backing `ONE_SHARE` shares, the quantity the high-water mark tracks
    pub fn share_value(&self) -> Result<u64> {
        self.convert_to_assets(ONE_SHARE, Rounding::Floor)
    }

    /// Same assets, `minted` more shares outstanding
    pub fn with_minted(&self, minted: u64) -> Result<Self> {
        Ok(Self {
            total_assets: self.total_assets,
            total_supply: self
                .total_supply
                .checked_add(minted)
                .ok_or(VaultError::MathOverflow)?,
        })
    }
}

/// Idle balance of the vault plus the redeemable value of its position in
/// every active adapter. Recomputed on every call.
pub fn total_managed_assets(
    vault: &Pubkey,
    adapters: &[AdapterConfig],
    token: &dyn AssetToken,
    registry: &dyn AdapterRegistry,
) -> Result<u64> {
    let mut total = token.balance_of(vault);

    for config in adapters {
        let adapter = registry
            .adapter(&config.adapter)
            .ok_or(VaultError::AdapterUnavailable)?;
        let position = adapter.preview_redeem(adapter.balance_of(vault))?;
        total = total
            .checked_add(position)
            .ok_or(VaultError::MathOverflow)?;
    }

    Ok(total)
}
