//! The board state machine.
//!
//! [`Board`] owns a fixed arena of 32 [`Piece`] slots, the move history, the
//! castling rights and a set of cached bitboards (occupancy, squares the
//! opponent controls, pins). Moves are applied in place and undone from the
//! snapshot stored in each [`Move`], so a single board can be reused for an
//! entire search tree.
//!
//! # Example
//!
//! ```
//! use chess_engine::Board;
//!
//! let mut board = Board::new();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let mv = board.play("e2e4").unwrap();
//! assert_eq!(mv.to_string(), "e4");
//! board.unmake().unwrap();
//! assert_eq!(board, Board::new());
//! ```

mod castling;
mod fen;
mod legal;
mod make;

pub use castling::{CastleSide, CastlingRights};

use crate::{Bitboard, Move, Piece, PieceId};
use chess_core::{Color, File, PieceKind, Rank, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Slots 0-7 hold White's back rank from a1 to h1, 8-15 White's pawns,
/// 16-23 Black's pawns and 24-31 Black's back rank from a8 to h8.
fn standard_layout() -> [Piece; 32] {
    let mut pieces = [Piece::captured(Color::White); 32];
    for (i, file) in File::ALL.into_iter().enumerate() {
        pieces[i] = Piece::new(Color::White, BACK_RANK[i], Square::new(file, Rank::R1));
        pieces[8 + i] = Piece::new(Color::White, PieceKind::Pawn, Square::new(file, Rank::R2));
        pieces[16 + i] = Piece::new(Color::Black, PieceKind::Pawn, Square::new(file, Rank::R7));
        pieces[24 + i] = Piece::new(Color::Black, BACK_RANK[i], Square::new(file, Rank::R8));
    }
    pieces
}

/// How a game ended for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Checkmate,
    /// Stalemate.
    Draw,
}

/// A friendly piece that may not leave the line between an opponent slider
/// and its own king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub piece: PieceId,
    pub attacker: PieceId,
    /// Attacker square, every square up to the king, and the king square.
    pub ray: Bitboard,
}

/// State the history does not reconstruct: who moved first and the counters
/// and en-passant target of a position loaded from FEN.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Origin {
    first_to_move: Color,
    /// Double push that produced a FEN en-passant target. Consulted only
    /// while the history is empty.
    en_passant: Option<Move>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Origin {
    fn default() -> Self {
        Origin {
            first_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// A chess board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: [Piece; 32],
    kings: [PieceId; 2],
    history: Vec<Move>,
    castling: CastlingRights,
    origin: Origin,

    occupied: Bitboard,
    /// Pieces of the side to move.
    friendly: Bitboard,
    opponent: Bitboard,
    /// Squares the opponent attacks, computed with the own king lifted off
    /// the board.
    controlled: Bitboard,
    check: bool,
    pins: Vec<Pin>,
}

impl Board {
    /// Creates a board in the standard starting position.
    pub fn new() -> Self {
        Board::assemble(
            standard_layout(),
            [PieceId(4), PieceId(28)],
            CastlingRights::ALL,
            Origin::default(),
        )
    }

    /// Puts the standard opening layout on the board and clears the history.
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    fn assemble(
        pieces: [Piece; 32],
        kings: [PieceId; 2],
        castling: CastlingRights,
        origin: Origin,
    ) -> Self {
        let mut board = Board {
            pieces,
            kings,
            history: Vec::new(),
            castling,
            origin,
            occupied: Bitboard::EMPTY,
            friendly: Bitboard::EMPTY,
            opponent: Bitboard::EMPTY,
            controlled: Bitboard::EMPTY,
            check: false,
            pins: Vec::new(),
        };
        board.refresh_occupancy();
        board.calculate_threats();
        board
    }

    /// The side to move: whoever moved first when the history length is
    /// even, the other side otherwise.
    #[inline]
    pub fn turn(&self) -> Color {
        if self.history.len() % 2 == 0 {
            self.origin.first_to_move
        } else {
            self.origin.first_to_move.opposite()
        }
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece; 32] {
        &self.pieces
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// The piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.pieces
            .iter()
            .position(|p| p.position().contains(square))
            .map(|i| PieceId(i as u8))
    }

    #[inline]
    pub fn king(&self, color: Color) -> PieceId {
        self.kings[color.index()]
    }

    /// Moves played on this board, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The previous move, used for en passant. For a position loaded from
    /// FEN with an en-passant target and no moves played yet, this is the
    /// double push that produced the target.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().or(self.origin.en_passant.as_ref())
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Squares the side not to move attacks.
    #[inline]
    pub fn controlled(&self) -> Bitboard {
        self.controlled
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pieces on an 8x8 grid indexed `[file][rank]`, for rendering.
    pub fn layout(&self) -> [[Option<&Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for piece in &self.pieces {
            if let Some(sq) = piece.square() {
                grid[sq.file().index() as usize][sq.rank().index() as usize] = Some(piece);
            }
        }
        grid
    }

    /// Recomputes the occupancy caches from the arena.
    fn refresh_occupancy(&mut self) {
        let us = self.turn();
        let mut friendly = Bitboard::EMPTY;
        let mut opponent = Bitboard::EMPTY;
        for piece in &self.pieces {
            if piece.color() == us {
                friendly |= piece.position();
            } else {
                opponent |= piece.position();
            }
        }
        self.friendly = friendly;
        self.opponent = opponent;
        self.occupied = friendly | opponent;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_occupancy() {
        let board = Board::new();
        assert_eq!(board.occupied().0, 0xFFFF_0000_0000_FFFF);
        assert_eq!(board.turn(), Color::White);
        assert!(!board.is_check());
        assert!(board.pins().is_empty());
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn kings_sit_in_their_slots() {
        let board = Board::new();
        let white = board.piece(board.king(Color::White));
        let black = board.piece(board.king(Color::Black));
        assert_eq!(white.kind(), PieceKind::King);
        assert_eq!(white.square(), Some(Square::E1));
        assert_eq!(black.kind(), PieceKind::King);
        assert_eq!(black.square(), Some(Square::E8));
    }

    #[test]
    fn layout_places_pieces_by_file_and_rank() {
        let board = Board::new();
        let grid = board.layout();
        let d1 = grid[3][0].unwrap();
        assert_eq!(d1.kind(), PieceKind::Queen);
        assert_eq!(d1.color(), Color::White);
        let g8 = grid[6][7].unwrap();
        assert_eq!(g8.kind(), PieceKind::Knight);
        assert_eq!(g8.color(), Color::Black);
        assert!(grid[4][3].is_none());
    }

    #[test]
    fn piece_at_finds_slot() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::A1), Some(PieceId(0)));
        assert_eq!(board.piece_at(Square::H8), Some(PieceId(31)));
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(board.piece_at(e4), None);
    }

    #[test]
    fn opponent_controls_its_third_rank_at_start() {
        let board = Board::new();
        let rank6 = Bitboard::rank(Rank::R6);
        assert_eq!(board.controlled() & rank6, rank6);
        assert!(!board.controlled().intersects(Bitboard::rank(Rank::R4)));
    }

    #[test]
    fn reset_restores_start() {
        let mut board = Board::new();
        board.play("e2e4").unwrap();
        board.play("e7e5").unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        assert!(board.history().is_empty());
    }
}
