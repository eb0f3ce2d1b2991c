use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Every rejected operation maps to a distinct variant so callers can branch
/// on kind. None of these are fatal to the process.
#[derive(Error, Debug)]
pub enum LedgerError {
    // Validation: rejected before any state mutation.
    #[error("invalid address: the null identity is not a valid account")]
    InvalidAddress,
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("deposit below the minimum creation balance")]
    DepositBelowMinimum,
    #[error("payment mismatch: expected {expected}, got {paid}")]
    AmountMismatch { expected: u128, paid: u128 },
    #[error("amount computation exceeds the representable range")]
    AmountOverflow,
    #[error("activation fee below the required amount")]
    InsufficientActivationFee,

    // State preconditions: business-rule rejections, no partial mutation.
    #[error("account is not active")]
    AccountNotActive,
    #[error("account is already active")]
    AccountAlreadyActive,
    #[error("account already exists")]
    AccountAlreadyExists,
    #[error("account is already frozen")]
    AccountAlreadyFrozen,
    #[error("borrower has no outstanding loan")]
    BorrowerDoesNotExist,
    #[error("borrower has no account")]
    BorrowerHasNoAccount,
    #[error("borrower is not eligible")]
    NotEligible,
    #[error("borrow ceiling reached")]
    MaxBorrowAmountReached,
    #[error("due date has passed; use the late-payment path")]
    DueDatePassed,

    // Authorization.
    #[error("caller lacks the admin capability")]
    Unauthorized,

    // External operations: any mutation already applied is rolled back.
    #[error("external value transfer failed")]
    TransferFailed,
    #[error("custodied pool holds insufficient funds")]
    InsufficientContractFunds,
    #[error("insufficient balance")]
    InsufficientBalance,

    // Interface / infrastructure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}
