//! Move records.
//!
//! A [`Move`] carries both the intent of a transition (which piece, where to,
//! what it promotes to) and, once committed, the snapshot needed to undo it.

use crate::board::{CastleSide, CastlingRights};
use crate::{Bitboard, PieceId};
use chess_core::{Color, PieceKind, Rank, Square};
use std::fmt;

/// Occupancy caches as they were before a move, relative to the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Occupancy {
    pub(crate) all: Bitboard,
    pub(crate) friendly: Bitboard,
    pub(crate) opponent: Bitboard,
}

/// State restored by unmake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Undo {
    pub(crate) castling: CastlingRights,
    pub(crate) occupancy: Occupancy,
    pub(crate) captured: Option<PieceId>,
    pub(crate) rook: Option<PieceId>,
}

impl Undo {
    const NONE: Undo = Undo {
        castling: CastlingRights::NONE,
        occupancy: Occupancy {
            all: Bitboard::EMPTY,
            friendly: Bitboard::EMPTY,
            opponent: Bitboard::EMPTY,
        },
        captured: None,
        rook: None,
    };
}

/// A chess move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Arena slot of the moving piece.
    pub piece: PieceId,
    pub color: Color,
    /// Kind of the mover before the move; a promoting move keeps `Pawn` here.
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    /// Square of the captured piece when it differs from `to` (en passant).
    pub capture_square: Option<Square>,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
    pub draw: bool,
    pub(crate) undo: Undo,
}

impl Move {
    /// Placeholder used to fill fixed-size move lists.
    pub const NULL: Move = Move {
        piece: PieceId(0),
        color: Color::White,
        kind: PieceKind::Pawn,
        from: Square::A1,
        to: Square::A1,
        capture: false,
        capture_square: None,
        castle: None,
        promotion: None,
        check: false,
        checkmate: false,
        draw: false,
        undo: Undo::NONE,
    };

    /// A quiet move of `piece` from `from` to `to`.
    pub const fn new(piece: PieceId, color: Color, kind: PieceKind, from: Square, to: Square) -> Self {
        Move {
            piece,
            color,
            kind,
            from,
            to,
            ..Move::NULL
        }
    }

    #[inline]
    pub const fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    #[inline]
    pub const fn with_en_passant(mut self, captured_at: Square) -> Self {
        self.capture = true;
        self.capture_square = Some(captured_at);
        self
    }

    #[inline]
    pub const fn with_castle(mut self, side: CastleSide) -> Self {
        self.castle = Some(side);
        self
    }

    #[inline]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Returns true if this is a pawn move onto its promotion rank.
    #[inline]
    pub fn reaches_last_rank(&self) -> bool {
        self.kind == PieceKind::Pawn && self.to.rank() == self.color.promotion_rank()
    }

    /// Returns true if this is a pawn advancing two squares.
    #[inline]
    pub fn is_double_push(&self) -> bool {
        self.kind == PieceKind::Pawn
            && self.from.rank() == self.color.pawn_rank()
            && self.to.rank()
                == match self.color {
                    Color::White => Rank::R4,
                    Color::Black => Rank::R5,
                }
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            s.push(kind.letter().to_ascii_lowercase());
        }
        s
    }
}

/// Short algebraic notation built only from the move's own fields.
///
/// Disambiguation between two identical pieces is not attempted.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.castle {
            Some(CastleSide::King) => write!(f, "O-O")?,
            Some(CastleSide::Queen) => write!(f, "O-O-O")?,
            None => {
                if self.kind == PieceKind::Pawn {
                    if self.capture {
                        write!(f, "{}", self.from.file())?;
                    }
                } else {
                    write!(f, "{}", self.kind.letter())?;
                }
                if self.capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", self.to)?;
                if let Some(kind) = self.promotion {
                    write!(f, "={}", kind.letter())?;
                }
            }
        }
        if self.checkmate {
            write!(f, "#")
        } else if self.check {
            write!(f, "+")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn uci_notation() {
        let mv = Move::new(PieceId(12), Color::White, PieceKind::Pawn, sq("e2"), sq("e4"));
        assert_eq!(mv.to_uci(), "e2e4");
        assert!(mv.is_double_push());

        let promo = Move::new(PieceId(8), Color::White, PieceKind::Pawn, sq("a7"), sq("a8"))
            .with_promotion(PieceKind::Knight);
        assert_eq!(promo.to_uci(), "a7a8n");
        assert!(promo.reaches_last_rank());
    }

    #[test]
    fn algebraic_display() {
        let knight = Move::new(PieceId(6), Color::White, PieceKind::Knight, sq("g1"), sq("f3"));
        assert_eq!(knight.to_string(), "Nf3");

        let mut capture = Move::new(PieceId(20), Color::Black, PieceKind::Pawn, sq("d5"), sq("c4"))
            .with_capture(true);
        capture.check = true;
        assert_eq!(capture.to_string(), "dxc4+");

        let mut castle = Move::new(PieceId(4), Color::White, PieceKind::King, sq("e1"), sq("c1"))
            .with_castle(CastleSide::Queen);
        castle.checkmate = true;
        assert_eq!(castle.to_string(), "O-O-O#");

        let promo = Move::new(PieceId(15), Color::White, PieceKind::Pawn, sq("g7"), sq("h8"))
            .with_capture(true)
            .with_promotion(PieceKind::Queen);
        assert_eq!(promo.to_string(), "gxh8=Q");
    }

    #[test]
    fn black_double_push_and_last_rank() {
        let push = Move::new(PieceId(19), Color::Black, PieceKind::Pawn, sq("d7"), sq("d5"));
        assert!(push.is_double_push());
        assert!(!push.reaches_last_rank());

        let single = Move::new(PieceId(19), Color::Black, PieceKind::Pawn, sq("d7"), sq("d6"));
        assert!(!single.is_double_push());

        let rook = Move::new(PieceId(24), Color::Black, PieceKind::Rook, sq("a2"), sq("a1"));
        assert!(!rook.reaches_last_rank());
    }
}
