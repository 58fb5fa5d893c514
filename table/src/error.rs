use minepot_core::GameError;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum TableError {
    #[error("A wager is already in progress")]
    SessionInProgress,
    #[error("Insufficient balance: bet {bet} exceeds available {available}")]
    InsufficientBalance { bet: f64, available: f64 },
    #[error("Deposit must be a positive amount")]
    InvalidDeposit,
    #[error("Reset target must be a finite, non-negative amount")]
    InvalidReset,
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, TableError>;
