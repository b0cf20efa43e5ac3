// Constants for the Multi-Strategy Vault

/// Seed for vault address derivation
pub const VAULT_SEED: &[u8] = b"vault";

/// Fixed-point scale for fee rates and allocation weights (1e18 = 100%)
pub const FEE_PRECISION: u64 = 1_000_000_000_000_000_000;

/// Maximum number of adapters in an allocation set
pub const MAX_ADAPTERS: usize = 10;

/// Extra decimals of share precision on top of the asset's own decimals.
/// Virtual shares of `10^DECIMALS_OFFSET` deter first-depositor inflation.
pub const DECIMALS_OFFSET: u8 = 3;

/// Share value recorded as high-water mark at genesis
pub const HIGH_WATER_MARK_GENESIS: u64 = 1_000_000_000;

/// Share amount whose asset value is tracked as the share value.
/// At bootstrap rate it is worth exactly `HIGH_WATER_MARK_GENESIS` assets.
pub const ONE_SHARE: u64 = HIGH_WATER_MARK_GENESIS * 10u64.pow(DECIMALS_OFFSET as u32);

pub const SECONDS_PER_DAY: i64 = 86_400;

/// 365.25 days
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

pub const MIN_QUIT_PERIOD: i64 = SECONDS_PER_DAY;
pub const MAX_QUIT_PERIOD: i64 = 7 * SECONDS_PER_DAY;
pub const DEFAULT_QUIT_PERIOD: i64 = 3 * SECONDS_PER_DAY;

/// Per-adapter allocations below this amount stay idle in the vault
pub const DUST_THRESHOLD: u64 = 10;

/// Domain tag prefixed to every signed permit message
pub const PERMIT_DOMAIN: &[u8] = b"multi-strategy-vault:permit";
