use crate::{Bitboard, Direction};

/// Squares one step away in every direction.
pub(crate) fn attacks(position: Bitboard) -> Bitboard {
    Direction::ALL
        .into_iter()
        .fold(Bitboard::EMPTY, |acc, dir| acc | position.shift(dir))
}
