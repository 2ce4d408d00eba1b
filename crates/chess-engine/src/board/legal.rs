//! Threat detection and legal move generation.

use super::{Board, CastleSide, Outcome, Pin};
use crate::pieces::slider_directions;
use crate::{Bitboard, Move, MoveList, PieceId};
use chess_core::{Color, PieceKind};

impl Board {
    /// Recomputes the squares the opponent controls, whether the side to move
    /// is in check, and which of its pieces are absolutely pinned.
    pub(crate) fn calculate_threats(&mut self) {
        let us = self.turn();
        let king = self.pieces[self.kings[us.index()].index()].position();
        // Lifting the king lets sliders see through it, so the king cannot
        // retreat along a checking line.
        let without_king = self.occupied.and_not(king);

        let mut controlled = Bitboard::EMPTY;
        let mut pins = Vec::new();
        for (index, piece) in self.pieces.iter().enumerate() {
            if piece.color() == us || piece.is_captured() {
                continue;
            }
            controlled |= piece.attack_map(without_king);

            for &dir in slider_directions(piece.kind()) {
                let ray = piece.position().ray_attack(dir, self.occupied);
                let blocker = ray & self.occupied;
                if !blocker.intersects(self.friendly) || blocker == king {
                    continue;
                }
                let beyond = piece.position().xray(dir, self.occupied);
                if !beyond.intersects(king) {
                    continue;
                }
                if let Some(pinned) = blocker.to_square().and_then(|sq| self.piece_at(sq)) {
                    pins.push(Pin {
                        piece: pinned,
                        attacker: PieceId(index as u8),
                        ray: piece.position() | ray | beyond,
                    });
                }
            }
        }

        self.check = controlled.intersects(king);
        self.controlled = controlled;
        self.pins = pins;
    }

    /// Returns true if `id` is absolutely pinned to its king.
    pub fn is_pinned(&self, id: PieceId) -> bool {
        self.pins.iter().any(|pin| pin.piece == id)
    }

    /// Returns true if any piece of `by` other than those in `ignore` attacks
    /// a square in `target` under the given occupancy.
    pub(crate) fn is_attacked(
        &self,
        target: Bitboard,
        by: Color,
        occupied: Bitboard,
        ignore: Bitboard,
    ) -> bool {
        self.pieces
            .iter()
            .filter(|p| p.color() == by && !p.is_captured() && !p.position().intersects(ignore))
            .any(|p| p.attack_map(occupied).intersects(target))
    }

    /// Plays `mv` out on a copy of the occupancy and reports whether the
    /// mover's king would then be attacked.
    pub(crate) fn leaves_king_attacked(&self, mv: &Move) -> bool {
        let from = Bitboard::from_square(mv.from);
        let to = Bitboard::from_square(mv.to);
        let victim = Bitboard::from_square(mv.capture_square.unwrap_or(mv.to)) & self.opponent;
        let occupied = self.occupied.and_not(from | victim) | to;
        let king = if mv.kind == PieceKind::King {
            to
        } else {
            self.pieces[self.kings[mv.color.index()].index()].position()
        };
        self.is_attacked(king, mv.color.opposite(), occupied, victim)
    }

    /// All legal moves for the side to move, in arena order and, per piece,
    /// in generation order.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for index in 0..self.pieces.len() {
            self.collect_legal_moves(PieceId(index as u8), &mut moves);
        }
        moves
    }

    /// Legal moves of a single piece. Empty when it is not that piece's turn.
    pub fn legal_moves_for(&self, id: PieceId) -> MoveList {
        let mut moves = MoveList::new();
        self.collect_legal_moves(id, &mut moves);
        moves
    }

    fn collect_legal_moves(&self, id: PieceId, moves: &mut MoveList) {
        let Some(piece) = self.pieces.get(id.index()) else {
            return;
        };
        if piece.is_captured() || piece.color() != self.turn() {
            return;
        }
        if piece.kind() == PieceKind::King {
            self.king_moves(id, moves);
            return;
        }

        let start = moves.len();
        piece.pseudo_legal_moves(id, self.occupied, self.opponent, self.last_move(), moves);

        // En passant removes two pawns from one rank, which pin detection
        // does not model, so it is always played out.
        let verify_all = self.check || self.is_pinned(id);
        moves.retain_from(start, |mv| {
            if verify_all || mv.capture_square.is_some() {
                !self.leaves_king_attacked(mv)
            } else {
                true
            }
        });

        if piece.kind() == PieceKind::Pawn {
            expand_promotions(start, moves);
        }
    }

    fn king_moves(&self, id: PieceId, moves: &mut MoveList) {
        let king = &self.pieces[id.index()];
        let Some(from) = king.square() else {
            return;
        };
        let targets = king
            .attack_map(self.occupied)
            .and_not(self.friendly)
            .and_not(self.controlled);
        for to in targets {
            moves.push(
                Move::new(id, king.color(), PieceKind::King, from, to)
                    .with_capture(self.opponent.contains(to)),
            );
        }
        self.castling_moves(id, moves);
    }

    /// Castling moves available to the king `id` of the side to move.
    pub(crate) fn castling_moves(&self, id: PieceId, moves: &mut MoveList) {
        if self.check {
            return;
        }
        let king = &self.pieces[id.index()];
        let color = king.color();
        for side in CastleSide::ALL {
            if !self.castling.has(color, side) {
                continue;
            }
            let (king_home, king_to) = side.king_squares(color);
            let (rook_home, _) = side.rook_squares(color);
            let rook_home_occupied = self.piece_at(rook_home).is_some_and(|rook| {
                let rook = &self.pieces[rook.index()];
                rook.color() == color && rook.kind() == PieceKind::Rook
            });
            if king.square() != Some(king_home) || !rook_home_occupied {
                continue;
            }
            if side.between(color).intersects(self.occupied)
                || side.king_path(color).intersects(self.controlled)
            {
                continue;
            }
            moves.push(Move::new(id, color, PieceKind::King, king_home, king_to).with_castle(side));
        }
    }

    /// Checkmate or draw when the side to move has no legal move.
    pub fn check_result(&self) -> Option<Outcome> {
        let mut moves = MoveList::new();
        for index in 0..self.pieces.len() {
            self.collect_legal_moves(PieceId(index as u8), &mut moves);
            if !moves.is_empty() {
                return None;
            }
        }
        Some(if self.check {
            Outcome::Checkmate
        } else {
            Outcome::Draw
        })
    }
}

/// Turns each last-rank pawn move from `start` on into four moves: the queen
/// promotion in place, the others appended.
fn expand_promotions(start: usize, moves: &mut MoveList) {
    let end = moves.len();
    for index in start..end {
        let Some(mv) = moves.get_mut(index) else {
            continue;
        };
        if !mv.reaches_last_rank() {
            continue;
        }
        let base = *mv;
        mv.promotion = Some(PieceKind::Queen);
        for kind in &PieceKind::PROMOTIONS[1..] {
            moves.push(base.with_promotion(*kind));
        }
    }
}
