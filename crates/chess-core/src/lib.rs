//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the rules engine and the bot:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Fen`] for reading positions in Forsyth-Edwards Notation

mod color;
mod fen;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError, Placement};
pub use piece::PieceKind;
pub use square::{File, Rank, Square, SquareError};
