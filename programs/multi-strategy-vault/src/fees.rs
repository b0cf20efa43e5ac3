use anchor_lang::prelude::*;

use crate::{
    accounting::Snapshot,
    constants::{FEE_PRECISION, ONE_SHARE, SECONDS_PER_YEAR},
    errors::VaultError,
    math::{mul_div, Rounding},
};

/// Fees accrued since the last checkpoint, in assets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccruedFees {
    pub management: u64,
    pub performance: u64,
}

impl AccruedFees {
    pub fn total(&self) -> Result<u64> {
        self.management
            .checked_add(self.performance)
            .ok_or(error!(VaultError::MathOverflow))
    }
}

/// Linear time-based fee on total managed assets.
///
/// fee = floor(total_assets × rate × elapsed / (year × 1e18))
pub fn management_fee(rate: u64, total_assets: u64, elapsed: i64) -> Result<u64> {
    if rate == 0 || elapsed <= 0 {
        return Ok(0);
    }

    let weighted = (total_assets as u128)
        .checked_mul(rate as u128)
        .ok_or(VaultError::MathOverflow)?;
    let denominator = (SECONDS_PER_YEAR as u128) * (FEE_PRECISION as u128);
    let elapsed = elapsed as u128;

    // Split the numerator so the single floor division stays inside u128
    let whole = (weighted / denominator)
        .checked_mul(elapsed)
        .ok_or(VaultError::MathOverflow)?;
    let partial = (weighted % denominator)
        .checked_mul(elapsed)
        .ok_or(VaultError::MathOverflow)?
        / denominator;

    let fee = whole.checked_add(partial).ok_or(VaultError::MathOverflow)?;
    u64::try_from(fee).map_err(|_| error!(VaultError::MathOverflow))
}

/// Fee on share value gained above the high-water mark. Zero at or below it.
///
/// fee = floor(floor((share_value - hwm) × supply / ONE_SHARE) × rate / 1e18)
pub fn performance_fee(rate: u64, share_value: u64, high_water_mark: u64, total_supply: u64) -> Result<u64> {
    if rate == 0 || share_value <= high_water_mark {
        return Ok(0);
    }

    let gain = mul_div(
        share_value - high_water_mark,
        total_supply,
        ONE_SHARE,
        Rounding::Floor,
    )?;

    mul_div(gain, rate, FEE_PRECISION, Rounding::Floor)
}

/// Shares to mint so that, after dilution, they are worth `total_fee` assets.
///
/// Solves fee_shares / (supply + fee_shares) = fee / assets, giving
/// fee_shares = fee × supply / (assets - fee). The fee is capped one unit
/// below the managed assets so settlement always succeeds.
pub fn fee_shares(total_fee: u64, snapshot: &Snapshot) -> Result<u64> {
    if total_fee == 0 || snapshot.total_assets == 0 {
        return Ok(0);
    }

    let fee = total_fee.min(snapshot.total_assets - 1);
    if fee == 0 {
        return Ok(0);
    }

    if snapshot.total_supply == 0 {
        return snapshot.convert_to_shares(fee, Rounding::Floor);
    }

    mul_div(
        fee,
        snapshot.total_supply,
        snapshot.total_assets - fee,
        Rounding::Floor,
    )
}
