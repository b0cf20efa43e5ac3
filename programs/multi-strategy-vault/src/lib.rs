// Multi-Strategy Vault - fee-accruing tokenized vault spreading deposits across strategy adapters
// Architecture: host-agnostic engine; the asset token, adapters and signature checks are traits
// Security: checked math, reentrancy guard, time-delayed governance changes

use anchor_lang::prelude::*;

pub mod accounting;
pub mod adapters;
pub mod allocation;
pub mod constants;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod interfaces;
pub mod ledger;
pub mod math;
pub mod state;
pub mod vault;

pub use instructions::{InitializeParams, PermitMessage};
pub use vault::{Env, Vault};

declare_id!("EDfzU1wWpvnysu7eGx3tPsUw9W6RWgLKF4mJDi6tzN69");
