use thiserror::Error;

/// Error returned when asked to create a board that cannot hold the starting
/// snake
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SizeError {
    #[error("board must have at least one row")]
    NoRows,
    #[error("board must have at least {min} columns, got {columns}", min = super::MIN_COLUMNS)]
    TooNarrow { columns: u16 },
}

/// Error returned when trying to advance a game that has already ended
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("cannot advance: the game is already over")]
pub struct GameOverError;
