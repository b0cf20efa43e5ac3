//! Contracts the vault requires of the collaborators around it.
//!
//! Every fallible call returns an Anchor `Result`; the vault propagates the
//! error unmodified and the host discards the whole operation.

use anchor_lang::prelude::*;

/// Underlying fungible asset (SPL token semantics)
pub trait AssetToken {
    /// Mint identity of the asset
    fn mint(&self) -> Pubkey;

    fn decimals(&self) -> u8;

    fn balance_of(&self, owner: &Pubkey) -> u64;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64;

    /// `owner` authorizes `spender` to move up to `amount`
    fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()>;

    /// Move `amount` out of `from`, authorized by `from` itself
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;

    /// Move `amount` out of `from`, spending the allowance `from` granted `spender`
    fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()>;
}

/// Yield strategy the vault allocates into (ERC-4626 style)
pub trait StrategyAdapter {
    /// Mint of the asset the adapter manages
    fn asset(&self) -> Pubkey;

    /// Pull `assets` from `depositor` and issue adapter shares to `receiver`
    fn deposit(
        &mut self,
        token: &mut dyn AssetToken,
        depositor: &Pubkey,
        assets: u64,
        receiver: &Pubkey,
    ) -> Result<u64>;

    /// Burn `shares` of `owner` and pay the assets to `receiver`
    fn redeem(
        &mut self,
        token: &mut dyn AssetToken,
        shares: u64,
        receiver: &Pubkey,
        owner: &Pubkey,
    ) -> Result<u64>;

    fn balance_of(&self, holder: &Pubkey) -> u64;

    fn preview_redeem(&self, shares: u64) -> Result<u64>;

    /// `u64::MAX` means unbounded
    fn max_deposit(&self, holder: &Pubkey) -> u64;

    /// `u64::MAX` means unbounded
    fn max_mint(&self, holder: &Pubkey) -> u64;
}

/// Resolves adapter keys stored in the allocation set to live capabilities
pub trait AdapterRegistry {
    fn adapter(&self, key: &Pubkey) -> Option<&dyn StrategyAdapter>;

    fn adapter_mut(&mut self, key: &Pubkey) -> Option<&mut dyn StrategyAdapter>;
}

/// Detached-signature check backing `permit`
pub trait SignatureVerifier {
    fn verify(&self, signer: &Pubkey, message: &[u8], signature: &[u8; 64]) -> bool;
}
