//! Errors raised when a move breaks the rules.

use thiserror::Error;

use crate::types::Point;

/// Reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMoveError {
    #[error("illegal move: {0} is off the board")]
    OffBoard(Point),
    #[error("illegal move: {0} is not empty")]
    Occupied(Point),
    #[error("illegal move: {0} is suicide")]
    SelfCapture(Point),
    #[error("illegal move: {0} retakes ko")]
    Ko(Point),
    #[error("illegal move: {0} flips nothing")]
    NoFlips(Point),
    #[error("illegal move: the game is over")]
    GameOver,
}
