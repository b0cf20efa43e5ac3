use anchor_lang::prelude::*;

/// Custom error codes for the Multi-Strategy Vault
///
/// Every failure is a named condition so callers can assert on the exact cause.
/// Collaborator failures (asset token, adapters, signature verifier) are not
/// listed here: they propagate unmodified.
#[error_code]
pub enum VaultError {
    #[msg("Receiver must not be the null identity")]
    InvalidReceiver,

    #[msg("Owner must not be the null identity")]
    InvalidOwner,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Operation would mint or burn zero shares")]
    ZeroShares,

    #[msg("Fee rates must be strictly below 100%")]
    InvalidFees,

    #[msg("Fee recipient must not be the null identity")]
    InvalidFeeRecipient,

    #[msg("Adapter count must be between 1 and 10")]
    InvalidAdapterCount,

    #[msg("Adapter allocation weight must be greater than zero")]
    ZeroAllocation,

    #[msg("Adapter allocation weights must sum to exactly 100%")]
    InvalidAllocationSum,

    #[msg("Adapter asset does not match vault asset")]
    AssetMismatch,

    #[msg("Adapter appears more than once in the set")]
    DuplicateAdapter,

    #[msg("Adapter is not known to the host")]
    UnknownAdapter,

    #[msg("Quit period must be between 1 and 7 days")]
    InvalidQuitPeriod,

    #[msg("Vault is not paused")]
    VaultNotPaused,

    #[msg("Vault is paused")]
    VaultPaused,

    #[msg("Deposit exceeds maximum depositable assets")]
    MaxDepositExceeded,

    #[msg("Mint exceeds maximum mintable shares")]
    MaxMintExceeded,

    #[msg("Withdrawal exceeds maximum withdrawable assets")]
    MaxWithdrawExceeded,

    #[msg("Redemption exceeds maximum redeemable shares")]
    MaxRedeemExceeded,

    #[msg("Insufficient shares balance")]
    InsufficientShares,

    #[msg("Insufficient share allowance")]
    InsufficientAllowance,

    #[msg("Quit period has not elapsed since the proposal")]
    QuitPeriodNotElapsed,

    #[msg("No pending change to commit")]
    NoPendingChange,

    #[msg("Unauthorized - caller is not vault owner")]
    Unauthorized,

    #[msg("Caller is not the nominated owner")]
    NotNominated,

    #[msg("Permit deadline has passed")]
    PermitExpired,

    #[msg("Permit signature verification failed")]
    InvalidSignature,

    #[msg("Reentrant call into a guarded vault operation")]
    Reentrancy,

    #[msg("Configured adapter could not be resolved")]
    AdapterUnavailable,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Permit message could not be encoded")]
    PermitEncodingFailed,
}

/// Failure categories callers can branch on without matching every variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    LimitExceeded,
    PolicyNotYetDue,
    AuthorizationDenied,
    ExternalCollaboratorFailure,
    Arithmetic,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        use VaultError::*;

        match self {
            InvalidReceiver | InvalidOwner | ZeroAmount | ZeroShares | InvalidFees
            | InvalidFeeRecipient | InvalidAdapterCount | ZeroAllocation
            | InvalidAllocationSum | AssetMismatch | DuplicateAdapter | UnknownAdapter
            | InvalidQuitPeriod | VaultNotPaused | PermitEncodingFailed => ErrorKind::InvalidInput,

            VaultPaused | MaxDepositExceeded | MaxMintExceeded | MaxWithdrawExceeded
            | MaxRedeemExceeded | InsufficientShares | InsufficientAllowance => {
                ErrorKind::LimitExceeded
            }

            QuitPeriodNotElapsed | NoPendingChange => ErrorKind::PolicyNotYetDue,

            Unauthorized | NotNominated | PermitExpired | InvalidSignature | Reentrancy => {
                ErrorKind::AuthorizationDenied
            }

            AdapterUnavailable => ErrorKind::ExternalCollaboratorFailure,

            MathOverflow | DivisionByZero => ErrorKind::Arithmetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(VaultError::ZeroAmount.kind(), ErrorKind::InvalidInput);
        assert_eq!(VaultError::MaxDepositExceeded.kind(), ErrorKind::LimitExceeded);
        assert_eq!(VaultError::QuitPeriodNotElapsed.kind(), ErrorKind::PolicyNotYetDue);
        assert_eq!(VaultError::NoPendingChange.kind(), ErrorKind::PolicyNotYetDue);
        assert_eq!(VaultError::Unauthorized.kind(), ErrorKind::AuthorizationDenied);
        assert_eq!(
            VaultError::AdapterUnavailable.kind(),
            ErrorKind::ExternalCollaboratorFailure
        );
        assert_eq!(VaultError::MathOverflow.kind(), ErrorKind::Arithmetic);
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let first: u32 = VaultError::InvalidReceiver.into();
        let second: u32 = VaultError::InvalidOwner.into();
        assert_eq!(first, anchor_lang::error::ERROR_CODE_OFFSET);
        assert_eq!(second, first + 1);
    }
}
