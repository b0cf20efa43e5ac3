// Vault operations, one `impl Vault` block per concern
pub mod adapters;
pub mod admin;
pub mod deposit;
pub mod fees;
pub mod initialize;
pub mod shares;
pub mod view;
pub mod withdraw;

pub use initialize::InitializeParams;
pub use shares::PermitMessage;
