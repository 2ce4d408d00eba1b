//! Negamax search with alpha-beta pruning.
//!
//! The search works on one mutable [`Board`]: every move is applied as a dry
//! run, searched, and unmade before the next one is tried, including when a
//! deeper call fails.

use crate::config::{BotConfig, ConfigError};
use crate::eval::Evaluator;
use chess_core::Color;
use chess_engine::{Board, ChessError, Move};
use thiserror::Error;
use tracing::{debug, info};

/// Score in centipawns from the side to move's perspective.
pub type Score = i32;

/// Score of being checkmated. Mates found closer to the root score higher.
pub const MATE: Score = 1_000_000;

/// Deepest search accepted, and the hard cap on recursion.
pub const MAX_DEPTH: u32 = 8;

const INFINITY: Score = MATE + 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal moves in this position")]
    NoLegalMoves,
    #[error("bot plays the other colour, it is {0}'s turn")]
    WrongTurn(Color),
    #[error(transparent)]
    Board(#[from] ChessError),
}

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: Score,
    /// Positions visited below the root.
    pub nodes: u64,
}

/// A fixed-depth searching bot.
#[derive(Debug, Clone)]
pub struct Bot {
    config: BotConfig,
    evaluator: Evaluator,
    nodes: u64,
}

impl Bot {
    /// Creates a bot after validating its configuration.
    pub fn new(config: BotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Bot {
            evaluator: Evaluator::new(config.eval),
            config,
            nodes: 0,
        })
    }

    /// Picks a move for the side to move.
    ///
    /// Root moves are tried in generation order and a later move replaces the
    /// current best only with a strictly higher score, so the result is
    /// deterministic. The board is returned to its original state.
    pub fn find_move(&mut self, board: &mut Board) -> Result<SearchResult, SearchError> {
        if let Some(side) = self.config.color {
            if Color::from(side) != board.turn() {
                return Err(SearchError::WrongTurn(board.turn()));
            }
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        self.nodes = 0;
        let depth = self.config.depth.clamp(1, MAX_DEPTH);
        let mut alpha = -INFINITY;
        let mut best: Option<(Move, Score)> = None;

        for mv in &moves {
            board.make_move(*mv, true)?;
            let score = self.negamax(board, depth - 1, 1, -INFINITY, -alpha);
            board.unmake()?;
            let score = -score?;
            debug!(mv = %mv, score, "root move");

            if best.map_or(true, |(_, top)| score > top) {
                best = Some((*mv, score));
            }
            alpha = alpha.max(score);
        }

        let (best_move, score) = best.ok_or(SearchError::NoLegalMoves)?;
        info!(
            best = %best_move,
            score,
            nodes = self.nodes,
            depth,
            "search finished"
        );
        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        })
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        ply: u32,
        mut alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchError> {
        self.nodes += 1;

        // Dry-run moves are not stamped with mate or draw, so look for
        // terminal positions directly.
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Ok(if board.is_check() {
                -MATE + ply as Score
            } else {
                0
            });
        }
        if depth == 0 || ply >= MAX_DEPTH {
            return Ok(self.evaluator.evaluate(board));
        }

        let mut value = -INFINITY;
        for mv in &moves {
            board.make_move(*mv, true)?;
            let score = self.negamax(board, depth - 1, ply + 1, -beta, -alpha);
            board.unmake()?;
            value = value.max(-score?);
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot(depth: u32) -> Bot {
        Bot::new(BotConfig {
            depth,
            ..BotConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        bot(3).find_move(&mut board).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn depth_one_counts_each_reply_once() {
        let mut board = Board::new();
        let result = bot(1).find_move(&mut board).unwrap();
        assert_eq!(result.nodes, 20);
    }

    #[test]
    fn pruning_visits_fewer_nodes_than_full_tree() {
        let mut board = Board::new();
        let result = bot(3).find_move(&mut board).unwrap();
        // 20 + 400 + 8902 nodes without pruning.
        assert!(result.nodes < 9322);
        assert!(result.nodes > 20);
    }

    #[test]
    fn invalid_depth_is_rejected() {
        let config = BotConfig {
            depth: 0,
            ..BotConfig::default()
        };
        assert!(matches!(Bot::new(config), Err(ConfigError::Depth(0))));
    }

    #[test]
    fn finds_mate_in_one_at_depth_three() {
        let mut board = Board::from_fen("k7/8/1K6/8/8/8/8/6Q1 w - - 0 1").unwrap();
        let result = bot(3).find_move(&mut board).unwrap();
        assert_eq!(result.score, MATE - 1);
        board.make_move(result.best_move, false).unwrap();
        assert!(board.history().last().unwrap().checkmate);
    }
}
