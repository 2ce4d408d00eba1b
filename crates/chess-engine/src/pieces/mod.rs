//! Piece records and per-kind attack and move generation.
//!
//! Generation is selected by a `match` on [`PieceKind`]: pawns, knights and
//! kings have their own step patterns, bishops, rooks and queens share the
//! ray-based slider code.

mod king;
mod knight;
mod pawn;
mod slider;

use crate::{Bitboard, Move, MoveList};
use chess_core::{Color, PieceKind, Square};

pub(crate) use slider::directions as slider_directions;

/// Index of a piece in the board's fixed arena of 32 slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One piece of the arena.
///
/// A captured piece stays in its slot with an empty position so that moves
/// referring to it by [`PieceId`] can restore it on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    position: Bitboard,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Piece {
            color,
            kind,
            position: Bitboard::from_square(square),
        }
    }

    /// An off-board placeholder for slots not used by a position.
    pub const fn captured(color: Color) -> Self {
        Piece {
            color,
            kind: PieceKind::Pawn,
            position: Bitboard::EMPTY,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Single-square board, or empty when captured.
    #[inline]
    pub const fn position(&self) -> Bitboard {
        self.position
    }

    #[inline]
    pub fn square(&self) -> Option<Square> {
        self.position.to_square()
    }

    #[inline]
    pub const fn is_captured(&self) -> bool {
        self.position.is_empty()
    }

    #[inline]
    pub(crate) fn set_position(&mut self, position: Bitboard) {
        self.position = position;
    }

    #[inline]
    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    /// Squares this piece threatens given the board occupancy. Own-king
    /// safety is not considered.
    pub fn attack_map(&self, occupied: Bitboard) -> Bitboard {
        match self.kind {
            PieceKind::Pawn => pawn::attacks(self.position, self.color),
            PieceKind::Knight => knight::attacks(self.position),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                slider::attacks(self.position, self.kind, occupied)
            }
            PieceKind::King => king::attacks(self.position),
        }
    }

    /// Appends this piece's pseudo-legal moves. Castling is not included.
    pub(crate) fn pseudo_legal_moves(
        &self,
        id: PieceId,
        occupied: Bitboard,
        opponent: Bitboard,
        last_move: Option<&Move>,
        moves: &mut MoveList,
    ) {
        let Some(from) = self.square() else {
            return;
        };
        if self.kind == PieceKind::Pawn {
            pawn::pseudo_legal_moves(
                id,
                self.color,
                self.position,
                occupied,
                opponent,
                last_move,
                moves,
            );
            return;
        }

        let friendly = occupied.and_not(opponent);
        for to in self.attack_map(occupied).and_not(friendly) {
            moves.push(
                Move::new(id, self.color, self.kind, from, to).with_capture(opponent.contains(to)),
            );
        }
    }
}
