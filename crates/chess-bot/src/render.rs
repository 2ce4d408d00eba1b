//! ASCII board diagrams.

use chess_engine::Board;

/// Draws the board with rank 8 at the top, FEN letters for pieces and `.`
/// for empty squares.
pub fn render(board: &Board) -> String {
    let layout = board.layout();
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for column in &layout {
            let c = column[rank].map_or('.', |p| p.kind().to_fen_char(p.color()));
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}
