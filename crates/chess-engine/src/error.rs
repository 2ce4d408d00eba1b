use chess_core::{Color, FenError, SquareError};
use thiserror::Error;

/// Errors raised by the board. All of them leave the board unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("it is not {0}'s turn")]
    WrongTurn(Color),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("a pawn reaching the last rank must name a promotion piece")]
    PromotionRequired,

    #[error("only a pawn reaching the last rank may promote")]
    PromotionForbidden,

    #[error("move {0} would leave the king in check")]
    KingLeftInCheck(String),

    #[error("no move to undo")]
    EmptyHistory,

    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
