//! Committing and undoing moves.

use super::{Board, CastleSide, Outcome};
use crate::mov::{Occupancy, Undo};
use crate::{Bitboard, ChessError, Move, MoveList};
use chess_core::{PieceKind, Square, SquareError};
use tracing::debug;

impl Board {
    /// Commits a move.
    ///
    /// The request only needs the piece, origin, destination and promotion
    /// kind; capture, en-passant and castling details are taken from the
    /// generated moves of that piece, and a destination it cannot reach is
    /// an [`ChessError::IllegalMove`]. A dry run skips the checkmate/draw
    /// stamping, which would need a full move generation.
    ///
    /// Whatever the mode, a move that leaves the mover's king attacked is
    /// undone before [`ChessError::KingLeftInCheck`] is returned, and no
    /// error leaves the board changed.
    pub fn make_move(&mut self, request: Move, dry_run: bool) -> Result<Move, ChessError> {
        let piece = *self
            .pieces
            .get(request.piece.index())
            .ok_or_else(|| ChessError::IllegalMove(request.to_uci()))?;
        if piece.square() != Some(request.from) {
            return Err(ChessError::IllegalMove(format!(
                "{}: no such piece on {}",
                request.to_uci(),
                request.from
            )));
        }

        let us = self.turn();
        if piece.color() != us {
            return Err(ChessError::WrongTurn(piece.color()));
        }

        let promotes = piece.kind() == PieceKind::Pawn && request.to.rank() == us.promotion_rank();
        match request.promotion {
            None if promotes => return Err(ChessError::PromotionRequired),
            Some(_) if !promotes => return Err(ChessError::PromotionForbidden),
            Some(kind) if !kind.is_promotion_target() => {
                return Err(ChessError::IllegalMove(format!(
                    "{}: cannot promote to {}",
                    request.to_uci(),
                    kind
                )))
            }
            _ => {}
        }

        let mv = self.resolve(request)?;

        self.apply(mv);
        let king = self.pieces[self.kings[us.index()].index()].position();
        if self.is_attacked(king, us.opposite(), self.occupied, Bitboard::EMPTY) {
            self.revert();
            debug!(mv = %mv.to_uci(), "rolled back move leaving the king attacked");
            return Err(ChessError::KingLeftInCheck(mv.to_uci()));
        }

        self.calculate_threats();
        let check = self.check;
        let outcome = if dry_run { None } else { self.check_result() };
        self.history
            .last_mut()
            .map(|last| {
                last.check = check;
                last.checkmate = outcome == Some(Outcome::Checkmate);
                last.draw = outcome == Some(Outcome::Draw);
                *last
            })
            .ok_or(ChessError::EmptyHistory)
    }

    /// Undoes the most recent move.
    pub fn unmake(&mut self) -> Result<Move, ChessError> {
        let mv = self.revert().ok_or(ChessError::EmptyHistory)?;
        self.calculate_threats();
        Ok(mv)
    }

    /// Parses coordinate notation such as `e2e4` or `a7a8q` into a move
    /// request for [`make_move`](Board::make_move).
    pub fn parse_move(&self, uci: &str) -> Result<Move, ChessError> {
        let square = |range: std::ops::Range<usize>| -> Result<Square, ChessError> {
            let text = uci
                .get(range)
                .ok_or_else(|| SquareError(uci.to_string()))?;
            Ok(text.parse()?)
        };
        let from = square(0..2)?;
        let to = square(2..4)?;

        let promotion = match uci.get(4..) {
            None | Some("") => None,
            Some(rest) => {
                let mut chars = rest.chars();
                match (chars.next().and_then(PieceKind::from_letter), chars.next()) {
                    (Some(kind), None) if kind.is_promotion_target() => Some(kind),
                    _ => return Err(ChessError::IllegalMove(uci.to_string())),
                }
            }
        };

        let id = self
            .piece_at(from)
            .ok_or_else(|| ChessError::IllegalMove(format!("{uci}: no piece on {from}")))?;
        let piece = &self.pieces[id.index()];
        let mut mv = Move::new(id, piece.color(), piece.kind(), from, to);
        mv.promotion = promotion;
        Ok(mv)
    }

    /// Parses and commits a move given in coordinate notation.
    pub fn play(&mut self, uci: &str) -> Result<Move, ChessError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv, false)
    }

    /// Matches a request against the piece's generated moves. King safety is
    /// not checked here so that self-check surfaces as `KingLeftInCheck`.
    fn resolve(&self, request: Move) -> Result<Move, ChessError> {
        let piece = &self.pieces[request.piece.index()];
        let mut candidates = MoveList::new();
        piece.pseudo_legal_moves(
            request.piece,
            self.occupied,
            self.opponent,
            self.last_move(),
            &mut candidates,
        );
        if piece.kind() == PieceKind::King {
            self.castling_moves(request.piece, &mut candidates);
        }
        candidates
            .iter()
            .find(|candidate| candidate.to == request.to)
            .map(|candidate| Move {
                promotion: request.promotion,
                ..*candidate
            })
            .ok_or_else(|| ChessError::IllegalMove(request.to_uci()))
    }

    /// Mutates the board for `mv` and pushes it onto the history.
    fn apply(&mut self, mut mv: Move) {
        let piece = self.pieces[mv.piece.index()];
        let color = piece.color();
        mv.color = color;
        mv.kind = piece.kind();
        mv.undo = Undo {
            castling: self.castling,
            occupancy: Occupancy {
                all: self.occupied,
                friendly: self.friendly,
                opponent: self.opponent,
            },
            captured: None,
            rook: None,
        };

        let victim_square = mv.capture_square.unwrap_or(mv.to);
        let victim = self
            .piece_at(victim_square)
            .filter(|id| self.pieces[id.index()].color() != color);
        if let Some(victim) = victim {
            let captured = self.pieces[victim.index()];
            if captured.kind() == PieceKind::Rook {
                if let Some(side) = CastleSide::of_rook_home(victim_square, captured.color()) {
                    self.castling.remove(captured.color(), side);
                }
            }
            self.pieces[victim.index()].set_position(Bitboard::EMPTY);
            mv.capture = true;
            mv.undo.captured = Some(victim);
        }

        if let Some(side) = mv.castle {
            let (rook_from, rook_to) = side.rook_squares(color);
            if let Some(rook) = self.piece_at(rook_from) {
                self.pieces[rook.index()].set_position(rook_to.into());
                mv.undo.rook = Some(rook);
            }
        }

        match mv.kind {
            PieceKind::King => self.castling.remove_color(color),
            PieceKind::Rook => {
                if let Some(side) = CastleSide::of_rook_home(mv.from, color) {
                    self.castling.remove(color, side);
                }
            }
            _ => {}
        }

        let moving = &mut self.pieces[mv.piece.index()];
        moving.set_position(mv.to.into());
        if let Some(kind) = mv.promotion {
            moving.set_kind(kind);
        }

        self.history.push(mv);
        self.refresh_occupancy();
    }

    /// Exact inverse of [`apply`](Self::apply) for the last history entry.
    /// Threat caches are left to the caller.
    fn revert(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;

        let moving = &mut self.pieces[mv.piece.index()];
        moving.set_position(mv.from.into());
        moving.set_kind(mv.kind);

        if let (Some(side), Some(rook)) = (mv.castle, mv.undo.rook) {
            let (rook_from, _) = side.rook_squares(mv.color);
            self.pieces[rook.index()].set_position(rook_from.into());
        }
        if let Some(victim) = mv.undo.captured {
            let at = mv.capture_square.unwrap_or(mv.to);
            self.pieces[victim.index()].set_position(at.into());
        }

        self.castling = mv.undo.castling;
        self.occupied = mv.undo.occupancy.all;
        self.friendly = mv.undo.occupancy.friendly;
        self.opponent = mv.undo.occupancy.opponent;
        Some(mv)
    }
}
