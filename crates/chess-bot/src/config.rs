//! Configuration file loading for the bot.
//!
//! A config file is TOML:
//!
//! ```toml
//! depth = 3
//! color = "black"
//!
//! [eval]
//! center_pawn = 30
//! ```
//!
//! Every key is optional.

use crate::eval::EvalWeights;
use crate::search::MAX_DEPTH;
use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("search depth {0} is outside 1..={MAX_DEPTH}")]
    Depth(u32),
}

/// The colour a bot plays, as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Search and evaluation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BotConfig {
    /// Search depth in plies. Defaults to 3.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// When set, the bot refuses to move for the other colour.
    #[serde(default)]
    pub color: Option<Side>,
    #[serde(default)]
    pub eval: EvalWeights,
}

fn default_depth() -> u32 {
    3
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            depth: default_depth(),
            color: None,
            eval: EvalWeights::default(),
        }
    }
}

impl BotConfig {
    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML for this schema, or
    /// [`ConfigError::Depth`] if the depth is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: BotConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if (1..=MAX_DEPTH).contains(&self.depth) {
            Ok(())
        } else {
            Err(ConfigError::Depth(self.depth))
        }
    }
}
