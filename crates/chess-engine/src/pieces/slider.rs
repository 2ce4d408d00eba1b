//! Bishop, rook and queen attacks as unions of ray attacks.

use crate::{Bitboard, Direction};
use chess_core::PieceKind;

/// Directions a kind slides along. Empty for non-sliders.
pub(crate) fn directions(kind: PieceKind) -> &'static [Direction] {
    match kind {
        PieceKind::Bishop => &Direction::DIAGONAL,
        PieceKind::Rook => &Direction::ORTHOGONAL,
        PieceKind::Queen => &Direction::ALL,
        _ => &[],
    }
}

pub(crate) fn attacks(position: Bitboard, kind: PieceKind, occupied: Bitboard) -> Bitboard {
    directions(kind)
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| {
            acc | position.ray_attack(dir, occupied)
        })
}
