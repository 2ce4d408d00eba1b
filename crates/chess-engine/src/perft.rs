//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Every node is visited by dry-run make and unmake on one board, so the
//! count also exercises the undo path.

use crate::{Board, ChessError};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &mut Board, depth: u32) -> Result<u64, ChessError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in &moves {
        board.make_move(*mv, true)?;
        let below = perft(board, depth - 1);
        board.unmake()?;
        nodes += below?;
    }
    Ok(nodes)
}

/// Perft with divide - node count below each root move, sorted by move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &mut Board, depth: u32) -> Result<Vec<(String, u64)>, ChessError> {
    let moves = board.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for mv in &moves {
        board.make_move(*mv, true)?;
        let below = if depth > 1 {
            perft(board, depth - 1)
        } else {
            Ok(1)
        };
        board.unmake()?;
        results.push((mv.to_uci(), below?));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn count(fen: &str, depth: u32) -> u64 {
        let mut board = Board::from_fen(fen).unwrap();
        let before = board.clone();
        let nodes = perft(&mut board, depth).unwrap();
        assert_eq!(board, before, "perft must leave the board as it found it");
        nodes
    }

    #[test]
    fn perft_startpos() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 1).unwrap(), 20);
        assert_eq!(perft(&mut board, 2).unwrap(), 400);
        assert_eq!(perft(&mut board, 3).unwrap(), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 4).unwrap(), 197281);
    }

    // Depth 5 is slower, only run in release mode
    #[test]
    #[ignore]
    fn perft_startpos_depth_5() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 5).unwrap(), 4865609);
    }

    #[test]
    fn perft_kiwipete() {
        assert_eq!(count(KIWIPETE, 1), 48);
        assert_eq!(count(KIWIPETE, 2), 2039);
        assert_eq!(count(KIWIPETE, 3), 97862);
    }

    #[test]
    fn perft_position3() {
        assert_eq!(count(POSITION_3, 1), 14);
        assert_eq!(count(POSITION_3, 2), 191);
        assert_eq!(count(POSITION_3, 3), 2812);
        assert_eq!(count(POSITION_3, 4), 43238);
    }

    #[test]
    fn perft_position4() {
        assert_eq!(count(POSITION_4, 1), 6);
        assert_eq!(count(POSITION_4, 2), 264);
        assert_eq!(count(POSITION_4, 3), 9467);
    }

    #[test]
    fn perft_position5() {
        assert_eq!(count(POSITION_5, 1), 44);
        assert_eq!(count(POSITION_5, 2), 1486);
        assert_eq!(count(POSITION_5, 3), 62379);
    }

    #[test]
    fn perft_divide_works() {
        let mut board = Board::new();
        let results = perft_divide(&mut board, 2).unwrap();
        assert_eq!(results.len(), 20);
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(results[0], ("a2a3".to_string(), 20));
    }
}
