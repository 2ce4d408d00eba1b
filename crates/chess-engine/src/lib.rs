//! Chess rules engine with bitboard representation.
//!
//! This crate provides:
//! - [`Bitboard`] and [`Direction`] - 64-bit square sets with shifts, ray and
//!   xray attacks
//! - [`Piece`] - per-kind attack maps and pseudo-legal move generation
//! - [`Move`] - a transition plus the snapshot needed to undo it
//! - [`Board`] - the piece arena, legal move generation, make and unmake
//! - [`perft`] - node counting for validating the move generator
//!
//! # Architecture
//!
//! The board owns a fixed array of 32 pieces. Moves refer to pieces by
//! [`PieceId`], and a captured piece keeps its slot with an empty position,
//! so undoing a move is a matter of restoring a few fields.
//!
//! # Example
//!
//! ```
//! use chess_engine::{Board, Outcome};
//!
//! let mut board = Board::new();
//! for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     board.play(uci).unwrap();
//! }
//! assert_eq!(board.check_result(), Some(Outcome::Checkmate));
//! assert_eq!(board.history().last().unwrap().to_string(), "Qh4#");
//! ```

mod bitboard;
mod board;
mod error;
mod mov;
mod movelist;
mod perft;
mod pieces;

pub use bitboard::{Bitboard, BitboardIter, Direction, Singles};
pub use board::{Board, CastleSide, CastlingRights, Outcome, Pin};
pub use error::ChessError;
pub use mov::Move;
pub use movelist::MoveList;
pub use perft::{perft, perft_divide};
pub use pieces::{Piece, PieceId};
