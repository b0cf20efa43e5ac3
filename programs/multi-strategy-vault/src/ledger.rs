use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Vault share balances, allowances and permit nonces.
///
/// Invariant: the sum of all balances equals `total_supply`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareLedger {
    total_supply: u64,
    balances: BTreeMap<Pubkey, u64>,
    allowances: BTreeMap<(Pubkey, Pubkey), u64>,
    nonces: BTreeMap<Pubkey, u64>,
}

impl ShareLedger {
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn nonce(&self, owner: &Pubkey) -> u64 {
        self.nonces.get(owner).copied().unwrap_or(0)
    }

    pub fn mint(&mut self, to: &Pubkey, shares: u64) -> Result<()> {
        let total_supply = self
            .total_supply
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;

        self.total_supply = total_supply;
        self.set_balance(to, balance);
        Ok(())
    }

    pub fn burn(&mut self, from: &Pubkey, shares: u64) -> Result<()> {
        let balance = self
            .balance_of(from)
            .checked_sub(shares)
            .ok_or(VaultError::InsufficientShares)?;

        // balance <= total_supply, so this cannot underflow
        self.total_supply -= shares;
        self.set_balance(from, balance);
        Ok(())
    }

    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, shares: u64) -> Result<()> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(shares)
            .ok_or(VaultError::InsufficientShares)?;
        self.set_balance(from, from_balance);

        let to_balance = self
            .balance_of(to)
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        self.set_balance(to, to_balance);
        Ok(())
    }

    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, shares: u64) {
        if shares == 0 {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), shares);
        }
    }

    /// Consume allowance; `u64::MAX` is an unlimited grant and never decreases
    pub fn spend_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, shares: u64) -> Result<()> {
        let current = self.allowance(owner, spender);
        if current == u64::MAX {
            return Ok(());
        }

        let remaining = current
            .checked_sub(shares)
            .ok_or(VaultError::InsufficientAllowance)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    /// Return the current nonce of `owner` and advance it
    pub fn use_nonce(&mut self, owner: &Pubkey) -> Result<u64> {
        let current = self.nonce(owner);
        let next = current.checked_add(1).ok_or(VaultError::MathOverflow)?;
        self.nonces.insert(*owner, next);
        Ok(current)
    }

    fn set_balance(&mut self, holder: &Pubkey, balance: u64) {
        if balance == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }
}
