use crate::{Bitboard, Direction, Move, MoveList, PieceId};
use chess_core::{Color, PieceKind};

/// Diagonal forward squares a pawn threatens, whether or not they are occupied.
pub(crate) fn attacks(position: Bitboard, color: Color) -> Bitboard {
    let ahead = position.shift(Direction::forward(color));
    ahead.shift(Direction::East) | ahead.shift(Direction::West)
}

/// Pushes, double pushes, captures and en passant. Promotion is left to the
/// board, which expands last-rank moves into one move per promotion kind.
pub(crate) fn pseudo_legal_moves(
    id: PieceId,
    color: Color,
    position: Bitboard,
    occupied: Bitboard,
    opponent: Bitboard,
    last_move: Option<&Move>,
    moves: &mut MoveList,
) {
    let Some(from) = position.to_square() else {
        return;
    };
    let forward = Direction::forward(color);
    let quiet = |to| Move::new(id, color, PieceKind::Pawn, from, to);

    let single = position.shift(forward).and_not(occupied);
    if let Some(to) = single.to_square() {
        moves.push(quiet(to));
        if from.rank() == color.pawn_rank() {
            if let Some(to) = single.shift(forward).and_not(occupied).to_square() {
                moves.push(quiet(to));
            }
        }
    }

    for to in attacks(position, color) & opponent {
        moves.push(quiet(to).with_capture(true));
    }

    if let Some(last) = last_move {
        if last.color != color
            && last.is_double_push()
            && from.rank() == color.en_passant_rank()
            && last.to.rank() == from.rank()
            && from.file().index().abs_diff(last.to.file().index()) == 1
        {
            let behind = Bitboard::from_square(last.to).shift(forward);
            if let Some(to) = behind.to_square() {
                moves.push(quiet(to).with_en_passant(last.to));
            }
        }
    }
}
