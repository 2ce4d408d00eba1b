use crate::{Bitboard, Direction};

/// Knight attacks from c3.
const TEMPLATE: Bitboard = Bitboard(0x0000_000A_1100_110A);
const TEMPLATE_FILE: i8 = 2;
const TEMPLATE_RANK: i8 = 2;

/// Translates the c3 template onto the knight's square. Rank moves are plain
/// shifts; file moves step one file at a time so wrapped squares are dropped.
pub(crate) fn attacks(position: Bitboard) -> Bitboard {
    let Some(square) = position.to_square() else {
        return Bitboard::EMPTY;
    };
    let rank_delta = square.rank().index() as i8 - TEMPLATE_RANK;
    let file_delta = square.file().index() as i8 - TEMPLATE_FILE;

    let mut board = if rank_delta >= 0 {
        Bitboard(TEMPLATE.0 << (8 * rank_delta as u32))
    } else {
        Bitboard(TEMPLATE.0 >> (8 * (-rank_delta) as u32))
    };

    let step = if file_delta >= 0 {
        Direction::East
    } else {
        Direction::West
    };
    for _ in 0..file_delta.unsigned_abs() {
        board = board.shift(step);
    }
    board
}
