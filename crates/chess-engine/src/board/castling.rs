//! Castling rights and the fixed geometry of both castling sides.

use crate::Bitboard;
use chess_core::{Color, File, Square};

/// The wing a king castles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// Shifts a rank-1 mask onto `color`'s back rank.
    const fn on_back_rank(mask: u64, color: Color) -> Bitboard {
        Bitboard(mask << (8 * color.back_rank().index()))
    }

    /// King origin and destination.
    pub const fn king_squares(self, color: Color) -> (Square, Square) {
        let rank = color.back_rank();
        let to = match self {
            CastleSide::King => File::G,
            CastleSide::Queen => File::C,
        };
        (Square::new(File::E, rank), Square::new(to, rank))
    }

    /// Rook origin and destination.
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let rank = color.back_rank();
        let (from, to) = match self {
            CastleSide::King => (File::H, File::F),
            CastleSide::Queen => (File::A, File::D),
        };
        (Square::new(from, rank), Square::new(to, rank))
    }

    /// Squares that must be empty: everything between king and rook.
    pub const fn between(self, color: Color) -> Bitboard {
        match self {
            CastleSide::King => Self::on_back_rank(0x60, color),
            CastleSide::Queen => Self::on_back_rank(0x0E, color),
        }
    }

    /// Squares the king crosses or lands on; none may be attacked.
    pub const fn king_path(self, color: Color) -> Bitboard {
        match self {
            CastleSide::King => Self::on_back_rank(0x60, color),
            CastleSide::Queen => Self::on_back_rank(0x0C, color),
        }
    }

    /// The side whose rook starts on `sq` for `color`, if any.
    pub fn of_rook_home(sq: Square, color: Color) -> Option<CastleSide> {
        CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_squares(color).0 == sq)
    }
}

/// Castling rights as a 4-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queen) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::King) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queen) => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Clears one right. Rights are never granted back.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Clears both rights of a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::King);
        self.remove(color, CastleSide::Queen);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// FEN castling field (`KQkq`, or `-` when empty).
    pub fn to_fen(self) -> String {
        let s: String = [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|(_, c)| c)
        .collect();
        if s.is_empty() {
            "-".to_string()
        } else {
            s
        }
    }
}
