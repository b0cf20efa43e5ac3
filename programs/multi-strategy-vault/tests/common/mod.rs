//! In-memory host for driving the vault in integration tests.
//!
//! The mock token and adapters stand in for SPL token accounts and strategy
//! programs. `Harness::exec` mirrors a transaction: on `Err` every collaborator
//! and the vault itself are rolled back.

#![allow(dead_code)]

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use multi_strategy_vault::{
    adapters::AdapterConfig,
    constants::FEE_PRECISION,
    errors::VaultError,
    interfaces::{AdapterRegistry, AssetToken, SignatureVerifier, StrategyAdapter},
    state::VaultFees,
    Env, InitializeParams, Vault,
};
use solana_sdk::signature::Signature;

pub const PERCENT: u64 = FEE_PRECISION / 100;
pub const DAY: i64 = 86_400;
pub const START_TIME: i64 = 1_700_000_000;
pub const ASSET_DECIMALS: u8 = 6;

/// SPL token program errors the mocks report
pub const TOKEN_INSUFFICIENT_FUNDS: u32 = 1;
pub const TOKEN_INSUFFICIENT_ALLOWANCE: u32 = 2;
pub const ADAPTER_FAILURE: u32 = 100;
pub const ADAPTER_CAPACITY_EXCEEDED: u32 = 101;

fn host_error(code: u32) -> anchor_lang::error::Error {
    ProgramError::Custom(code).into()
}

// =============================================================================
// Asset token
// =============================================================================

#[derive(Clone, Debug)]
pub struct MockToken {
    mint: Pubkey,
    decimals: u8,
    balances: BTreeMap<Pubkey, u64>,
    allowances: BTreeMap<(Pubkey, Pubkey), u64>,
}

impl MockToken {
    pub fn new(decimals: u8) -> Self {
        Self {
            mint: Pubkey::new_unique(),
            decimals,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn mint_to(&mut self, to: &Pubkey, amount: u64) {
        *self.balances.entry(*to).or_default() += amount;
    }

    fn debit(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(host_error(TOKEN_INSUFFICIENT_FUNDS));
        }
        self.balances.insert(*from, balance - amount);
        Ok(())
    }
}

impl AssetToken for MockToken {
    fn mint(&self) -> Pubkey {
        self.mint
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn balance_of(&self, owner: &Pubkey) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        self.allowances.insert((*owner, *spender), amount);
        Ok(())
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.debit(from, amount)?;
        self.mint_to(to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<()> {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(host_error(TOKEN_INSUFFICIENT_ALLOWANCE));
        }
        self.debit(from, amount)?;
        if allowance != u64::MAX {
            self.allowances.insert((*from, *spender), allowance - amount);
        }
        self.mint_to(to, amount);
        Ok(())
    }
}

// =============================================================================
// Strategy adapters
// =============================================================================

/// ERC-4626 style strategy holding its assets under its own key
#[derive(Clone, Debug)]
pub struct MockAdapter {
    pub key: Pubkey,
    pub asset: Pubkey,
    pub total_assets: u64,
    pub total_shares: u64,
    shares: BTreeMap<Pubkey, u64>,
    /// Ceiling on `total_assets`
    pub deposit_cap: Option<u64>,
    /// Ceiling on `total_shares`
    pub mint_cap: Option<u64>,
    pub fail: bool,
}

impl MockAdapter {
    pub fn new(asset: Pubkey) -> Self {
        Self {
            key: Pubkey::new_unique(),
            asset,
            total_assets: 0,
            total_shares: 0,
            shares: BTreeMap::new(),
            deposit_cap: None,
            mint_cap: None,
            fail: false,
        }
    }

    fn convert_to_shares(&self, assets: u64) -> u64 {
        if self.total_shares == 0 || self.total_assets == 0 {
            return assets;
        }
        ((assets as u128) * (self.total_shares as u128) / (self.total_assets as u128)) as u64
    }

    fn convert_to_assets(&self, shares: u64) -> u64 {
        if self.total_shares == 0 {
            return shares;
        }
        ((shares as u128) * (self.total_assets as u128) / (self.total_shares as u128)) as u64
    }
}

impl StrategyAdapter for MockAdapter {
    fn asset(&self) -> Pubkey {
        self.asset
    }

    fn deposit(
        &mut self,
        token: &mut dyn AssetToken,
        depositor: &Pubkey,
        assets: u64,
        receiver: &Pubkey,
    ) -> Result<u64> {
        if self.fail {
            return Err(host_error(ADAPTER_FAILURE));
        }
        if assets > self.max_deposit(receiver) {
            return Err(host_error(ADAPTER_CAPACITY_EXCEEDED));
        }
        let shares = self.convert_to_shares(assets);
        if shares == 0 || shares > self.max_mint(receiver) {
            return Err(host_error(ADAPTER_CAPACITY_EXCEEDED));
        }

        token.transfer_from(&self.key, depositor, &self.key, assets)?;
        self.total_assets += assets;
        self.total_shares += shares;
        *self.shares.entry(*receiver).or_default() += shares;
        Ok(shares)
    }

    fn redeem(
        &mut self,
        token: &mut dyn AssetToken,
        shares: u64,
        receiver: &Pubkey,
        owner: &Pubkey,
    ) -> Result<u64> {
        if self.fail {
            return Err(host_error(ADAPTER_FAILURE));
        }
        let balance = self.balance_of(owner);
        if balance < shares {
            return Err(host_error(TOKEN_INSUFFICIENT_FUNDS));
        }

        let assets = self.convert_to_assets(shares);
        token.transfer(&self.key, receiver, assets)?;
        self.total_assets -= assets;
        self.total_shares -= shares;
        self.shares.insert(*owner, balance - shares);
        Ok(assets)
    }

    fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.shares.get(holder).copied().unwrap_or(0)
    }

    fn preview_redeem(&self, shares: u64) -> Result<u64> {
        Ok(self.convert_to_assets(shares))
    }

    fn max_deposit(&self, _holder: &Pubkey) -> u64 {
        self.deposit_cap
            .map(|cap| cap.saturating_sub(self.total_assets))
            .unwrap_or(u64::MAX)
    }

    fn max_mint(&self, _holder: &Pubkey) -> u64 {
        self.mint_cap
            .map(|cap| cap.saturating_sub(self.total_shares))
            .unwrap_or(u64::MAX)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Adapters(pub BTreeMap<Pubkey, MockAdapter>);

impl AdapterRegistry for Adapters {
    fn adapter(&self, key: &Pubkey) -> Option<&dyn StrategyAdapter> {
        self.0.get(key).map(|a| a as &dyn StrategyAdapter)
    }

    fn adapter_mut(&mut self, key: &Pubkey) -> Option<&mut dyn StrategyAdapter> {
        self.0.get_mut(key).map(|a| a as &mut dyn StrategyAdapter)
    }
}

// =============================================================================
// Signatures
// =============================================================================

pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, signer: &Pubkey, message: &[u8], signature: &[u8; 64]) -> bool {
        Signature::from(*signature).verify(signer.as_ref(), message)
    }
}

// =============================================================================
// World
// =============================================================================

#[derive(Clone, Debug)]
pub struct World {
    pub token: MockToken,
    pub adapters: Adapters,
    pub now: i64,
}

impl World {
    pub fn new() -> Self {
        Self {
            token: MockToken::new(ASSET_DECIMALS),
            adapters: Adapters::default(),
            now: START_TIME,
        }
    }

    pub fn add_adapter(&mut self) -> Pubkey {
        let adapter = MockAdapter::new(self.token.mint());
        let key = adapter.key;
        self.adapters.0.insert(key, adapter);
        key
    }

    pub fn adapter(&self, key: &Pubkey) -> &MockAdapter {
        &self.adapters.0[key]
    }

    pub fn adapter_mut(&mut self, key: &Pubkey) -> &mut MockAdapter {
        self.adapters
            .0
            .get_mut(key)
            .expect("adapter registered")
    }

    pub fn env(&mut self, caller: Pubkey) -> Env<'_> {
        Env {
            caller,
            now: self.now,
            token: &mut self.token,
            adapters: &mut self.adapters,
        }
    }

    pub fn warp(&mut self, seconds: i64) {
        self.now += seconds;
    }

    /// Strategy gains `amount` assets without issuing shares
    pub fn simulate_yield(&mut self, adapter: &Pubkey, amount: u64) {
        self.token.mint_to(adapter, amount);
        self.adapter_mut(adapter).total_assets += amount;
    }

    /// Strategy loses `amount` assets
    pub fn simulate_loss(&mut self, adapter: &Pubkey, amount: u64) {
        let strategy = self.adapter_mut(adapter);
        strategy.total_assets -= amount;
        let key = strategy.key;
        let balance = self.token.balance_of(&key);
        self.token.balances.insert(key, balance - amount);
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct Harness {
    pub world: World,
    pub vault: Vault,
    pub owner: Pubkey,
    pub fee_recipient: Pubkey,
    pub adapters: Vec<Pubkey>,
}

impl Harness {
    /// Vault over fresh adapters with the given weights (in percent)
    pub fn new(weights: &[u64], fees: VaultFees) -> Self {
        Self::with_limit(weights, fees, u64::MAX)
    }

    pub fn with_limit(weights: &[u64], fees: VaultFees, deposit_limit: u64) -> Self {
        let mut world = World::new();
        let owner = Pubkey::new_unique();
        let fee_recipient = Pubkey::new_unique();

        let adapters: Vec<Pubkey> = weights.iter().map(|_| world.add_adapter()).collect();
        let configs = adapters
            .iter()
            .zip(weights)
            .map(|(key, weight)| AdapterConfig::new(*key, weight * PERCENT))
            .collect();

        let params = InitializeParams {
            vault_id: 0,
            adapters: configs,
            fees,
            fee_recipient,
            deposit_limit,
            owner,
        };
        let vault = Vault::initialize(&mut world.env(owner), params).expect("vault initializes");

        Self {
            world,
            vault,
            owner,
            fee_recipient,
            adapters,
        }
    }

    /// Run one operation as a transaction: everything rolls back on `Err`
    pub fn exec<T>(
        &mut self,
        caller: Pubkey,
        op: impl FnOnce(&mut Vault, &mut Env<'_>) -> Result<T>,
    ) -> Result<T> {
        let world_checkpoint = self.world.clone();
        let vault_checkpoint = self.vault.clone();

        let result = {
            let mut env = self.world.env(caller);
            op(&mut self.vault, &mut env)
        };

        if result.is_err() {
            self.world = world_checkpoint;
            self.vault = vault_checkpoint;
        }
        result
    }

    pub fn view<T>(&mut self, op: impl FnOnce(&Vault, &Env<'_>) -> Result<T>) -> T {
        let env = self.world.env(Pubkey::default());
        op(&self.vault, &env).expect("view succeeds")
    }

    /// New user holding `amount` assets with the vault approved to pull them
    pub fn user(&mut self, amount: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.world.token.mint_to(&user, amount);
        let vault = self.vault.address();
        self.world
            .token
            .approve(&user, &vault, u64::MAX)
            .expect("approve");
        user
    }

    pub fn deposit(&mut self, user: Pubkey, assets: u64) -> Result<u64> {
        self.exec(user, |vault, env| vault.deposit(env, assets, user))
    }

    pub fn redeem(&mut self, user: Pubkey, shares: u64) -> Result<u64> {
        self.exec(user, |vault, env| vault.redeem(env, shares, user, user))
    }

    pub fn total_assets(&mut self) -> u64 {
        self.view(|vault, env| vault.total_assets(env))
    }

    pub fn idle(&self) -> u64 {
        self.world.token.balance_of(&self.vault.address())
    }

    /// Vault's position in `adapter`, in adapter shares
    pub fn position(&self, adapter: &Pubkey) -> u64 {
        self.world.adapter(adapter).balance_of(&self.vault.address())
    }
}

pub fn fees(deposit: u64, withdrawal: u64, management: u64, performance: u64) -> VaultFees {
    VaultFees {
        deposit,
        withdrawal,
        management,
        performance,
    }
}

pub fn no_fees() -> VaultFees {
    VaultFees::default()
}

// =============================================================================
// Error assertions
// =============================================================================

pub fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                e.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
