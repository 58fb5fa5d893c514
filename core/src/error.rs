use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Bet must be a positive amount")]
    InvalidBet,
    #[error("Mine count must be at least 1 and leave at least one safe cell")]
    InvalidMineCount,
    #[error("No active session accepts this operation")]
    NoActiveSession,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cell was already revealed")]
    CellAlreadyRevealed,
    #[error("Board parameters are invalid")]
    InvalidParameters,
}

pub type Result<T> = core::result::Result<T, GameError>;
