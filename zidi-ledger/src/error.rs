use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("No account for phone {0}")]
    AccountNotFound(String),

    #[error("Insufficient balance: has {has}, needs {needs}")]
    InsufficientBalance { has: Decimal, needs: Decimal },

    #[error("Settlement address collision for phone {0}")]
    AddressCollision(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
