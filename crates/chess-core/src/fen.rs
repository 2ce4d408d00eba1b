//! FEN (Forsyth-Edwards Notation) record parsing.
//!
//! This module only decodes the text into typed fields. Whether the described
//! position is playable (king count, rights consistency) is decided by the
//! engine when it loads the record.

use crate::{Color, File, PieceKind, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    Placement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling rights: {0}")]
    Castling(String),

    #[error("invalid en passant square: {0}")]
    EnPassant(String),

    #[error("invalid move counter: {0}")]
    Counter(String),
}

/// One piece standing on one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// A decoded FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Pieces in ascending square order (a1 first, h8 last).
    pub placements: Vec<Placement>,
    pub side_to_move: Color,
    /// White king-side, white queen-side, black king-side, black queen-side.
    pub castling: [bool; 4],
    /// Square passed over by the last double pawn push, on rank 3 or 6.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string. The two move counters are optional.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let placements = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let castling = parse_castling(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;

        let halfmove_clock = match fields.get(4) {
            Some(s) => parse_counter(s)?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(s) => parse_counter(s)?.max(1),
            None => 1,
        };

        Ok(Fen {
            placements,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Returns the standard starting position.
    pub fn startpos() -> Self {
        let mut placements = Vec::with_capacity(32);
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for rank in Rank::ALL {
            for file in File::ALL {
                let square = Square::new(file, rank);
                let found = match rank {
                    Rank::R1 => Some((back[file.index() as usize], Color::White)),
                    Rank::R2 => Some((PieceKind::Pawn, Color::White)),
                    Rank::R7 => Some((PieceKind::Pawn, Color::Black)),
                    Rank::R8 => Some((back[file.index() as usize], Color::Black)),
                    _ => None,
                };
                if let Some((kind, color)) = found {
                    placements.push(Placement { square, kind, color });
                }
            }
        }
        Fen {
            placements,
            side_to_move: Color::White,
            castling: [true; 4],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

fn parse_placement(s: &str) -> Result<Vec<Placement>, FenError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::Placement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placements = Vec::new();
    // FEN lists rank 8 first.
    for (row_index, row) in rows.iter().enumerate() {
        let rank = Rank::ALL[7 - row_index];
        let mut file: u8 = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::Placement(format!("bad empty count '{c}'")));
                }
                file += skip as u8;
            } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                let file_of = File::from_index(file).ok_or_else(|| {
                    FenError::Placement(format!("rank {} has more than 8 squares", rank))
                })?;
                placements.push(Placement {
                    square: Square::new(file_of, rank),
                    kind,
                    color,
                });
                file += 1;
            } else {
                return Err(FenError::Placement(format!("unexpected character '{c}'")));
            }
            if file > 8 {
                return Err(FenError::Placement(format!(
                    "rank {} has more than 8 squares",
                    rank
                )));
            }
        }
        if file != 8 {
            return Err(FenError::Placement(format!(
                "rank {} has {} squares",
                rank, file
            )));
        }
    }

    placements.sort_by_key(|p| p.square);
    Ok(placements)
}

fn parse_castling(s: &str) -> Result<[bool; 4], FenError> {
    let mut rights = [false; 4];
    if s == "-" {
        return Ok(rights);
    }
    for c in s.chars() {
        let slot = match c {
            'K' => 0,
            'Q' => 1,
            'k' => 2,
            'q' => 3,
            _ => return Err(FenError::Castling(s.to_string())),
        };
        if rights[slot] {
            return Err(FenError::Castling(s.to_string()));
        }
        rights[slot] = true;
    }
    Ok(rights)
}

fn parse_en_passant(s: &str) -> Result<Option<Square>, FenError> {
    if s == "-" {
        return Ok(None);
    }
    let square = Square::from_algebraic(s).map_err(|_| FenError::EnPassant(s.to_string()))?;
    match square.rank() {
        Rank::R3 | Rank::R6 => Ok(Some(square)),
        _ => Err(FenError::EnPassant(s.to_string())),
    }
}

fn parse_counter(s: &str) -> Result<u32, FenError> {
    s.parse().map_err(|_| FenError::Counter(s.to_string()))
}
