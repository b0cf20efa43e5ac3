use anchor_lang::prelude::*;

use crate::{constants::DECIMALS_OFFSET, errors::VaultError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rounding {
    Floor,
    Ceiling,
}

/// Convert assets to shares with a virtual offset.
///
/// Formula: shares = assets × (total_shares + 10^offset) / (total_assets + 1)
///
/// On an empty vault this is the bootstrap rate `assets × 10^offset`. The
/// virtual shares keep a donation to a near-empty vault from moving the price
/// enough to round a later depositor down to zero shares.
pub fn convert_to_shares(
    assets: u64,
    total_assets: u64,
    total_shares: u64,
    rounding: Rounding,
) -> Result<u64> {
    let (virtual_assets, virtual_shares) = virtual_totals(total_assets, total_shares)?;
    mul_div(assets, virtual_shares, virtual_assets, rounding)
}

/// Convert shares to assets with a virtual offset.
///
/// Formula: assets = shares × (total_assets + 1) / (total_shares + 10^offset)
pub fn convert_to_assets(
    shares: u64,
    total_assets: u64,
    total_shares: u64,
    rounding: Rounding,
) -> Result<u64> {
    let (virtual_assets, virtual_shares) = virtual_totals(total_assets, total_shares)?;
    mul_div(shares, virtual_assets, virtual_shares, rounding)
}

/// [`convert_to_shares`] clamped to `u64::MAX`, for capacity limits
pub fn convert_to_shares_saturating(
    assets: u64,
    total_assets: u64,
    total_shares: u64,
    rounding: Rounding,
) -> Result<u64> {
    let (virtual_assets, virtual_shares) = virtual_totals(total_assets, total_shares)?;
    saturating_mul_div(assets, virtual_shares, virtual_assets, rounding)
}

fn virtual_totals(total_assets: u64, total_shares: u64) -> Result<(u64, u64)> {
    let offset = 10u64
        .checked_pow(DECIMALS_OFFSET as u32)
        .ok_or(VaultError::MathOverflow)?;

    let virtual_shares = total_shares
        .checked_add(offset)
        .ok_or(VaultError::MathOverflow)?;

    let virtual_assets = total_assets
        .checked_add(1)
        .ok_or(VaultError::MathOverflow)?;

    Ok((virtual_assets, virtual_shares))
}

/// Safe multiplication then division with configurable rounding.
///
/// Computes: (value × numerator) / denominator
/// Uses u128 intermediate to prevent overflow.
pub fn mul_div(value: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    let result = mul_div_wide(value, numerator, denominator, rounding)?;
    u64::try_from(result).map_err(|_| error!(VaultError::MathOverflow))
}

/// Like [`mul_div`] but clamps to `u64::MAX` instead of failing on overflow.
///
/// Used for capacity limits where `u64::MAX` already means "unbounded".
pub fn saturating_mul_div(
    value: u64,
    numerator: u64,
    denominator: u64,
    rounding: Rounding,
) -> Result<u64> {
    let result = mul_div_wide(value, numerator, denominator, rounding)?;
    Ok(u64::try_from(result).unwrap_or(u64::MAX))
}

fn mul_div_wide(value: u64, numerator: u64, denominator: u64, rounding: Rounding) -> Result<u128> {
    require!(denominator > 0, VaultError::DivisionByZero);

    // u64 × u64 always fits in u128
    let product = (value as u128) * (numerator as u128);
    let denom = denominator as u128;

    let result = match rounding {
        Rounding::Floor => product / denom,
        Rounding::Ceiling => {
            let quotient = product / denom;
            if product % denom == 0 {
                quotient
            } else {
                quotient + 1
            }
        }
    };

    Ok(result)
}
