//! Static evaluation.
//!
//! Material in centipawns plus a handful of additive positional terms. The
//! score is always from the side to move's perspective.

use crate::search::Score;
use chess_core::{Color, PieceKind};
use chess_engine::{Bitboard, Board, Piece};
use serde::{Deserialize, Serialize};

/// Piece values in centipawns
const KING_VALUE: Score = 20_000;
const QUEEN_VALUE: Score = 900;
const ROOK_VALUE: Score = 500;
const BISHOP_VALUE: Score = 300;
const KNIGHT_VALUE: Score = 300;
const PAWN_VALUE: Score = 100;

/// d4, e4, d5, e5.
const CENTER: Bitboard = Bitboard(0x0000_0018_1800_0000);
/// The ring c3-f6 around the centre.
const SEMI_CENTER: Bitboard = Bitboard(0x0000_3C24_243C_0000);
const RIM: Bitboard = Bitboard(
    Bitboard::FILE_A.0 | Bitboard::FILE_H.0 | Bitboard::RANK_1.0 | Bitboard::RANK_8.0,
);

/// Tunable positional weights, in centipawns.
///
/// Penalties are stored as negative numbers so every term is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Pawn on d4, e4, d5 or e5.
    pub center_pawn: Score,
    /// Knight, bishop, rook or queen on a centre square.
    pub center_piece: Score,
    pub semi_center_pawn: Score,
    pub semi_center_piece: Score,
    /// Knight on the a/h files or the first/last rank.
    pub knight_on_rim: Score,
    /// Side has castled at some point in the game.
    pub castled_king: Score,
    /// Knight, bishop or queen still on its back rank.
    pub undeveloped: Score,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            center_pawn: 25,
            center_piece: 15,
            semi_center_pawn: 10,
            semi_center_piece: 5,
            knight_on_rim: -15,
            castled_king: 40,
            undeveloped: -10,
        }
    }
}

/// Material value of a piece kind in centipawns.
pub const fn material(kind: PieceKind) -> Score {
    match kind {
        PieceKind::King => KING_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Pawn => PAWN_VALUE,
    }
}

/// Scores positions with a fixed set of weights.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Evaluator { weights }
    }

    /// Evaluate the position from the side to move's perspective.
    pub fn evaluate(&self, board: &Board) -> Score {
        let us = board.turn();
        let mut score = 0;

        for piece in board.pieces().iter().filter(|p| !p.is_captured()) {
            let value = material(piece.kind()) + self.positional(piece);
            if piece.color() == us {
                score += value;
            } else {
                score -= value;
            }
        }

        for color in Color::ALL {
            if has_castled(board, color) {
                let bonus = self.weights.castled_king;
                score += if color == us { bonus } else { -bonus };
            }
        }
        score
    }

    fn positional(&self, piece: &Piece) -> Score {
        let w = &self.weights;
        let at = piece.position();
        let mut score = 0;

        match piece.kind() {
            PieceKind::Pawn => {
                if at.intersects(CENTER) {
                    score += w.center_pawn;
                } else if at.intersects(SEMI_CENTER) {
                    score += w.semi_center_pawn;
                }
            }
            PieceKind::King => {}
            kind => {
                if at.intersects(CENTER) {
                    score += w.center_piece;
                } else if at.intersects(SEMI_CENTER) {
                    score += w.semi_center_piece;
                }
                if kind == PieceKind::Knight && at.intersects(RIM) {
                    score += w.knight_on_rim;
                }
                let home = Bitboard::rank(piece.color().back_rank());
                if kind != PieceKind::Rook && at.intersects(home) {
                    score += w.undeveloped;
                }
            }
        }
        score
    }
}

fn has_castled(board: &Board, color: Color) -> bool {
    board
        .history()
        .iter()
        .any(|mv| mv.color == color && mv.castle.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let board = Board::new();
        assert_eq!(Evaluator::default().evaluate(&board), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        let mut board = Board::new();
        board.play("e2e4").unwrap();
        let eval = Evaluator::default();
        // e4 is a centre square; Black is to move.
        assert_eq!(eval.evaluate(&board), -25);
    }

    #[test]
    fn material_dominates() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let eval = Evaluator::default();
        assert!(eval.evaluate(&board) > QUEEN_VALUE - 50);

        let board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
        assert!(eval.evaluate(&board) < -(QUEEN_VALUE - 50));
    }

    #[test]
    fn castling_earns_a_bonus() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let eval = Evaluator::default();
        assert_eq!(eval.evaluate(&board), 0);
        board.play("e1g1").unwrap();
        assert_eq!(eval.evaluate(&board), -40);
        board.play("e8c8").unwrap();
        assert_eq!(eval.evaluate(&board), 0);
    }

    #[test]
    fn knight_on_the_rim() {
        let weights = EvalWeights::default();
        let eval = Evaluator::new(weights);
        let rim = Board::from_fen("4k3/8/8/8/N7/8/8/4K3 w - - 0 1").unwrap();
        let centre = Board::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(eval.evaluate(&rim), KNIGHT_VALUE + weights.knight_on_rim);
        assert_eq!(eval.evaluate(&centre), KNIGHT_VALUE + weights.center_piece);
    }

    #[test]
    fn weights_are_tunable() {
        let flat = EvalWeights {
            center_pawn: 0,
            center_piece: 0,
            semi_center_pawn: 0,
            semi_center_piece: 0,
            knight_on_rim: 0,
            castled_king: 0,
            undeveloped: 0,
        };
        let mut board = Board::new();
        board.play("e2e4").unwrap();
        assert_eq!(Evaluator::new(flat).evaluate(&board), 0);
    }
}
