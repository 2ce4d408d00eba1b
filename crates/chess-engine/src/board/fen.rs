//! Loading and writing positions in Forsyth-Edwards Notation.

use super::{Board, CastleSide, CastlingRights, Origin};
use crate::{Bitboard, ChessError, Direction, Move, Piece, PieceId};
use chess_core::{Color, Fen, PieceKind, Rank, Square};

impl Board {
    /// Loads a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let record = Fen::parse(fen)?;
        Board::from_record(&record)
    }

    /// Loads a parsed FEN record.
    ///
    /// White's pieces fill slots 0-15 and Black's slots 16-31, each in
    /// ascending square order; unused slots hold captured placeholders.
    /// Castling rights whose king or rook is away from home are dropped.
    pub fn from_record(record: &Fen) -> Result<Self, ChessError> {
        let mut pieces = [Piece::captured(Color::White); 32];
        for slot in &mut pieces[16..] {
            *slot = Piece::captured(Color::Black);
        }
        let mut next = [0usize, 16];
        let mut kings: [Option<PieceId>; 2] = [None, None];

        for placement in &record.placements {
            let side = placement.color.index();
            if next[side] >= 16 * (side + 1) {
                return Err(ChessError::InvalidPosition(format!(
                    "{} has more than 16 pieces",
                    placement.color
                )));
            }
            if placement.kind == PieceKind::Pawn
                && matches!(placement.square.rank(), Rank::R1 | Rank::R8)
            {
                return Err(ChessError::InvalidPosition(format!(
                    "pawn on {}",
                    placement.square
                )));
            }
            if placement.kind == PieceKind::King {
                if kings[side].is_some() {
                    return Err(ChessError::InvalidPosition(format!(
                        "{} has more than one king",
                        placement.color
                    )));
                }
                kings[side] = Some(PieceId(next[side] as u8));
            }
            pieces[next[side]] = Piece::new(placement.color, placement.kind, placement.square);
            next[side] += 1;
        }

        let [Some(white_king), Some(black_king)] = kings else {
            return Err(ChessError::InvalidPosition(
                "each side needs exactly one king".to_string(),
            ));
        };

        let mut castling = CastlingRights::ALL;
        let sides = [
            (Color::White, CastleSide::King),
            (Color::White, CastleSide::Queen),
            (Color::Black, CastleSide::King),
            (Color::Black, CastleSide::Queen),
        ];
        for (granted, (color, side)) in record.castling.into_iter().zip(sides) {
            let home = |square: Square, kind: PieceKind| {
                pieces
                    .iter()
                    .any(|p| p.color() == color && p.kind() == kind && p.square() == Some(square))
            };
            let in_place =
                home(side.king_squares(color).0, PieceKind::King) && home(side.rook_squares(color).0, PieceKind::Rook);
            if !(granted && in_place) {
                castling.remove(color, side);
            }
        }

        let origin = Origin {
            first_to_move: record.side_to_move,
            en_passant: None,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
        };
        let mut board = Board::assemble(pieces, [white_king, black_king], castling, origin);

        if let Some(target) = record.en_passant {
            board.origin.en_passant = Some(board.seed_double_push(target)?);
        }

        let waiting = board.turn().opposite();
        let their_king = board.pieces[board.kings[waiting.index()].index()].position();
        if board.is_attacked(their_king, board.turn(), board.occupied, Bitboard::EMPTY) {
            return Err(ChessError::InvalidPosition(format!(
                "{waiting} is in check but it is not their turn"
            )));
        }
        Ok(board)
    }

    /// Rebuilds the double push that left `target` behind.
    fn seed_double_push(&self, target: Square) -> Result<Move, ChessError> {
        let pusher = self.turn().opposite();
        let expected = match pusher {
            Color::White => Rank::R3,
            Color::Black => Rank::R6,
        };
        let invalid = || {
            ChessError::InvalidPosition(format!("en passant square {target} has no pawn to capture"))
        };
        if target.rank() != expected {
            return Err(invalid());
        }

        let at = Bitboard::from_square(target);
        let landed = at.shift(Direction::forward(pusher));
        let started = at.shift(Direction::forward(pusher.opposite()));
        let (Some(from), Some(to)) = (started.to_square(), landed.to_square()) else {
            return Err(invalid());
        };
        if self.occupied.intersects(at | started) {
            return Err(invalid());
        }
        let pawn = self
            .piece_at(to)
            .filter(|id| {
                let p = &self.pieces[id.index()];
                p.color() == pusher && p.kind() == PieceKind::Pawn
            })
            .ok_or_else(invalid)?;
        Ok(Move::new(pawn, pusher, PieceKind::Pawn, from, to))
    }

    /// Writes the current position as FEN.
    pub fn to_fen(&self) -> String {
        let layout = self.layout();
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for column in &layout {
                match column[rank] {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.kind().to_fen_char(piece.color()));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.turn() {
            Color::White => 'w',
            Color::Black => 'b',
        };

        let en_passant = self
            .last_move()
            .filter(|mv| mv.is_double_push())
            .and_then(|mv| {
                Bitboard::from_square(mv.to)
                    .shift(Direction::forward(mv.color.opposite()))
                    .to_square()
            })
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        let plies = self.history.len();
        let halfmove = match self
            .history
            .iter()
            .rposition(|mv| mv.kind == PieceKind::Pawn || mv.capture)
        {
            Some(index) => plies - 1 - index,
            None => self.origin.halfmove_clock as usize + plies,
        };
        let black_first = usize::from(self.origin.first_to_move == Color::Black);
        let fullmove = self.origin.fullmove_number as usize + (plies + black_first) / 2;

        format!(
            "{placement} {side} {} {en_passant} {halfmove} {fullmove}",
            self.castling.to_fen()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn startpos_fen_matches_reset() {
        let board = Board::from_fen(Fen::STARTPOS).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn fen_round_trips() {
        for fen in [
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "4k3/8/8/8/8/8/8/4K3 b - - 12 40",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn counters_advance_with_play() {
        let mut board = Board::new();
        board.play("g1f3").unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1"
        );
        board.play("e7e5").unwrap();
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/8/5N2/PPPPPPPP/RNBQKB1R w KQkq e6 0 2"
        );
    }

    #[test]
    fn black_to_move_from_fen() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").unwrap();
        assert_eq!(board.turn(), Color::Black);
        let king = board.piece(board.king(Color::Black));
        assert_eq!(king.square(), Some(Square::E8));
    }

    #[test]
    fn en_passant_target_enables_capture() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        let mv = board.play("e5d6").unwrap();
        assert_eq!(mv.capture_square, Square::from_algebraic("d5").ok());
        assert!(board.piece_at(Square::from_algebraic("d5").unwrap()).is_none());
    }

    #[test]
    fn misplaced_castling_rights_are_dropped() {
        let board = Board::from_fen("r3k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
        assert_eq!(board.castling_rights().to_fen(), "Kq");
    }

    #[test]
    fn invalid_positions_are_rejected() {
        for fen in [
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            "4k3/8/8/8/8/8/8/P3K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e6 0 1",
            "4k3/4Q3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/pppppppp/pppppppp/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert!(
                matches!(Board::from_fen(fen), Err(ChessError::InvalidPosition(_))),
                "{fen} should be rejected"
            );
        }
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(ChessError::Fen(_))
        ));
    }
}
