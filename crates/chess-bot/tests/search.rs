use chess_bot::{Bot, BotConfig, ConfigError, SearchError, Side, MATE};
use chess_core::Color;
use chess_engine::Board;
use std::io::Write;

fn bot(depth: u32) -> Bot {
    Bot::new(BotConfig {
        depth,
        ..BotConfig::default()
    })
    .unwrap()
}

fn scholars_setup() -> Board {
    let mut board = Board::new();
    for uci in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
        board.play(uci).unwrap();
    }
    board
}

#[test]
fn search_is_deterministic() {
    let mut board = Board::new();
    board.play("e2e4").unwrap();
    let first = bot(3).find_move(&mut board).unwrap();
    let second = bot(3).find_move(&mut board).unwrap();
    assert_eq!(first.best_move.to_uci(), second.best_move.to_uci());
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

#[test]
fn finds_mate_in_one() {
    for depth in [1, 2, 3] {
        let mut board = scholars_setup();
        let result = bot(depth).find_move(&mut board).unwrap();
        assert_eq!(result.best_move.to_uci(), "h5f7", "depth {depth}");
        assert_eq!(result.score, MATE - 1);
    }
}

#[test]
fn takes_a_free_queen() {
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let result = bot(2).find_move(&mut board).unwrap();
    assert_eq!(result.best_move.to_uci(), "d1d5");
    assert!(result.score > 0);
}

#[test]
fn terminal_positions_have_no_move() {
    let mut mated = scholars_setup();
    mated.play("h5f7").unwrap();
    assert_eq!(
        bot(2).find_move(&mut mated),
        Err(SearchError::NoLegalMoves)
    );

    let mut stalemate = Board::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
    assert_eq!(
        bot(2).find_move(&mut stalemate),
        Err(SearchError::NoLegalMoves)
    );
}

#[test]
fn bot_bound_to_a_colour_waits_its_turn() {
    let mut bot = Bot::new(BotConfig {
        depth: 1,
        color: Some(Side::Black),
        ..BotConfig::default()
    })
    .unwrap();
    let mut board = Board::new();
    assert_eq!(
        bot.find_move(&mut board),
        Err(SearchError::WrongTurn(Color::White))
    );
    board.play("d2d4").unwrap();
    let result = bot.find_move(&mut board).unwrap();
    assert_eq!(result.best_move.color, Color::Black);
}

#[test]
fn self_play_keeps_history_consistent() {
    let mut board = Board::new();
    let mut player = bot(2);
    for _ in 0..6 {
        let result = player.find_move(&mut board).unwrap();
        board.make_move(result.best_move, false).unwrap();
    }
    assert_eq!(board.history().len(), 6);
    assert_eq!(board.turn(), Color::White);
    let reloaded = Board::from_fen(&board.to_fen()).unwrap();
    assert_eq!(reloaded.to_fen(), board.to_fen());
}

#[test]
fn load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "depth = 2\ncolor = \"white\"\n\n[eval]\ncastled_king = 60").unwrap();

    let config = BotConfig::load(file.path()).unwrap();
    assert_eq!(config.depth, 2);
    assert_eq!(config.color, Some(Side::White));
    assert_eq!(config.eval.castled_king, 60);
    assert!(Bot::new(config).is_ok());
}

#[test]
fn config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(matches!(BotConfig::load(&missing), Err(ConfigError::Read(_))));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "depth = \"deep\"").unwrap();
    assert!(matches!(BotConfig::load(&bad), Err(ConfigError::Parse(_))));

    let deep = dir.path().join("deep.toml");
    std::fs::write(&deep, "depth = 12").unwrap();
    assert!(matches!(BotConfig::load(&deep), Err(ConfigError::Depth(12))));
}
