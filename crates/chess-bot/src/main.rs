//! Command-line front end for the bot.
//!
//! Sets up a position from `--fen` and `--moves`, then lets the bot choose
//! one move, or play `--self-play N` plies against itself. Logs go to
//! stderr; the diagram or JSON report goes to stdout.

use anyhow::Context;
use chess_bot::{render, Bot, BotConfig, Score};
use chess_engine::{Board, Outcome};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Fixed-depth negamax chess bot.
#[derive(Parser)]
#[command(name = "chess-bot")]
#[command(about = "Chooses chess moves with a fixed-depth negamax search")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search depth in plies, overrides the config file
    #[arg(short, long)]
    depth: Option<u32>,

    /// Starting position in FEN (defaults to the standard position)
    #[arg(long)]
    fen: Option<String>,

    /// Moves to play before searching, in coordinate notation (e2e4 e7e5 ...)
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Let the bot play this many plies against itself
    #[arg(long)]
    self_play: Option<u32>,

    /// Print a JSON report instead of a board diagram
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct MoveReport {
    uci: String,
    san: String,
    score: Score,
    nodes: u64,
}

#[derive(Serialize)]
struct Report {
    moves: Vec<MoveReport>,
    fen: String,
    outcome: Option<&'static str>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BotConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if args.self_play.is_some() {
        config.color = None;
    }

    let mut board = match &args.fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("invalid FEN '{fen}'"))?,
        None => Board::new(),
    };
    for uci in &args.moves {
        board
            .play(uci)
            .with_context(|| format!("cannot play '{uci}'"))?;
    }

    let mut bot = Bot::new(config)?;
    let plies = args.self_play.unwrap_or(1);
    let mut moves = Vec::new();

    for _ in 0..plies {
        if board.check_result().is_some() {
            break;
        }
        let result = bot.find_move(&mut board)?;
        let played = board.make_move(result.best_move, false)?;
        tracing::info!(mv = %played, fen = %board.to_fen(), "played");
        moves.push(MoveReport {
            uci: played.to_uci(),
            san: played.to_string(),
            score: result.score,
            nodes: result.nodes,
        });
    }

    let outcome = board.check_result().map(|o| match o {
        Outcome::Checkmate => "checkmate",
        Outcome::Draw => "draw",
    });

    if args.json {
        let report = Report {
            moves,
            fen: board.to_fen(),
            outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&board));
        println!();
        for mv in &moves {
            println!("{} ({}) score {} nodes {}", mv.san, mv.uci, mv.score, mv.nodes);
        }
        println!("{}", board.to_fen());
        if let Some(outcome) = outcome {
            println!("{outcome}");
        }
    }
    Ok(())
}
