//! Fixed-depth negamax chess bot.
//!
//! The bot searches a single mutable [`chess_engine::Board`] with negamax and
//! alpha-beta pruning, making and unmaking moves in place, and scores leaves
//! with a material plus positional heuristic.
//!
//! # Example
//!
//! ```
//! use chess_bot::{Bot, BotConfig};
//! use chess_engine::Board;
//!
//! let mut board = Board::new();
//! let mut bot = Bot::new(BotConfig { depth: 2, ..BotConfig::default() }).unwrap();
//! let result = bot.find_move(&mut board).unwrap();
//! assert!(board.legal_moves().iter().any(|m| m.to_uci() == result.best_move.to_uci()));
//! ```

pub mod config;
pub mod eval;
pub mod render;
pub mod search;

pub use config::{BotConfig, ConfigError, Side};
pub use eval::{EvalWeights, Evaluator};
pub use render::render;
pub use search::{Bot, Score, SearchError, SearchResult, MATE, MAX_DEPTH};
