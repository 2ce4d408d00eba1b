//! Bitboard representation and operations.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! chess board. This allows efficient parallel operations on multiple squares.

use chess_core::{Color, File, Rank, Square, SquareError};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// One of the eight compass directions a piece can step or slide in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Rook directions.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Change in square index for one step in this direction.
    pub const fn delta(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    /// The direction pawns of `color` advance in.
    pub const fn forward(color: Color) -> Direction {
        match color {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }
}

/// A 64-bit board representation.
///
/// Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (little-endian rank-file mapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all squares set).
    pub const FULL: Bitboard = Bitboard(!0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Creates a bitboard from a raw u64.
    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bit())
    }

    /// All squares on one rank.
    #[inline]
    pub const fn rank(rank: Rank) -> Self {
        Bitboard(Self::RANK_1.0 << (8 * rank.index()))
    }

    /// All squares on one file.
    #[inline]
    pub const fn file(file: File) -> Self {
        Bitboard(Self::FILE_A.0 << file.index())
    }

    /// Parses two-character square notation into a single-bit board.
    pub fn from_notation(s: &str) -> Result<Self, SquareError> {
        Square::from_algebraic(s).map(Bitboard::from_square)
    }

    /// Notation of the lowest set square, if any.
    pub fn to_notation(self) -> Option<String> {
        self.to_square().map(Square::to_algebraic)
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & sq.bit()) != 0
    }

    #[inline]
    pub const fn union(self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 & other.0)
    }

    /// Squares in `self` that are not in `other`.
    #[inline]
    pub const fn and_not(self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 & !other.0)
    }

    /// Returns true if the two boards share at least one square.
    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// The lowest set square.
    #[inline]
    pub fn to_square(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Pops and returns the least significant bit.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.to_square()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Moves every square one step in `dir`, dropping squares that would
    /// leave the board or wrap around to the opposite file.
    #[inline]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        let not_a = !Self::FILE_A.0;
        let not_h = !Self::FILE_H.0;
        Bitboard(match dir {
            Direction::North => self.0 << 8,
            Direction::South => self.0 >> 8,
            Direction::East => (self.0 << 1) & not_a,
            Direction::West => (self.0 >> 1) & not_h,
            Direction::NorthEast => (self.0 << 9) & not_a,
            Direction::NorthWest => (self.0 << 7) & not_h,
            Direction::SouthEast => (self.0 >> 7) & not_a,
            Direction::SouthWest => (self.0 >> 9) & not_h,
        })
    }

    /// Squares reached by sliding in `dir` from every set square, stopping at
    /// and including the first occupied square.
    pub fn ray_attack(self, dir: Direction, occupied: Bitboard) -> Bitboard {
        let mut attacks = Bitboard::EMPTY;
        let mut frontier = self;
        for _ in 0..7 {
            frontier = frontier.shift(dir);
            attacks |= frontier;
            frontier = frontier.and_not(occupied);
            if frontier.is_empty() {
                break;
            }
        }
        attacks
    }

    /// Squares beyond the first blocker in `dir`, up to and including the
    /// second blocker. Empty when the ray has no blocker.
    pub fn xray(self, dir: Direction, occupied: Bitboard) -> Bitboard {
        let blockers = self.ray_attack(dir, occupied) & occupied;
        if blockers.is_empty() {
            return Bitboard::EMPTY;
        }
        blockers.ray_attack(dir, occupied)
    }

    /// Splits the board into single-square boards, lowest square first.
    #[inline]
    pub fn singles(self) -> Singles {
        Singles(self)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Self {
        Bitboard::from_square(sq)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#018x})", self.0)?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = rank * 8 + file;
                if (self.0 >> sq) & 1 == 1 {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over set squares in a bitboard.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

/// Iterator returned by [`Bitboard::singles`].
pub struct Singles(Bitboard);

impl Iterator for Singles {
    type Item = Bitboard;

    #[inline]
    fn next(&mut self) -> Option<Bitboard> {
        if self.0.is_empty() {
            return None;
        }
        let lowest = Bitboard(self.0 .0 & self.0 .0.wrapping_neg());
        self.0 .0 ^= lowest.0;
        Some(lowest)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(s: &str) -> Bitboard {
        Bitboard::from_notation(s).unwrap()
    }

    #[test]
    fn notation_maps_to_file_plus_rank() {
        assert_eq!(bb("a1").0, 1);
        assert_eq!(bb("h1").0, 1 << 7);
        assert_eq!(bb("d3").0, 1 << (3 + 2 * 8));
        assert_eq!(bb("H8").0, 1 << 63);
        assert_eq!(bb("e4").to_notation().as_deref(), Some("e4"));
        assert!(Bitboard::from_notation("j2").is_err());
        assert!(Bitboard::from_notation("a").is_err());
    }

    #[test]
    fn set_operations() {
        let a = bb("a1") | bb("b1");
        let b = bb("b1") | bb("c1");
        assert_eq!(a.union(b), bb("a1") | bb("b1") | bb("c1"));
        assert_eq!(a.intersection(b), bb("b1"));
        assert_eq!(a.and_not(b), bb("a1"));
        assert!(a.intersects(b));
        assert!(!bb("a1").intersects(bb("h8")));
    }

    #[test]
    fn shifts_do_not_wrap_files() {
        assert_eq!(bb("h1").shift(Direction::East), Bitboard::EMPTY);
        assert_eq!(bb("a2").shift(Direction::West), Bitboard::EMPTY);
        assert_eq!(bb("h4").shift(Direction::NorthEast), Bitboard::EMPTY);
        assert_eq!(bb("a4").shift(Direction::NorthWest), Bitboard::EMPTY);
        assert_eq!(bb("h4").shift(Direction::SouthEast), Bitboard::EMPTY);
        assert_eq!(bb("a4").shift(Direction::SouthWest), Bitboard::EMPTY);
        assert_eq!(bb("a8").shift(Direction::North), Bitboard::EMPTY);
        assert_eq!(bb("a1").shift(Direction::South), Bitboard::EMPTY);
    }

    #[test]
    fn shift_deltas_match_geometry() {
        let d4 = bb("d4");
        for dir in Direction::ALL {
            let moved = d4.shift(dir);
            let expected = 27 + dir.delta() as i32;
            assert_eq!(moved.0, 1u64 << expected, "{dir:?}");
        }
        assert_eq!(bb("d4").shift(Direction::SouthEast), bb("e3"));
        assert_eq!(bb("d4").shift(Direction::SouthWest), bb("c3"));
    }

    #[test]
    fn ray_attack_stops_at_first_blocker() {
        let occupied = bb("a1") | bb("a5") | bb("a7");
        let ray = bb("a1").ray_attack(Direction::North, occupied);
        assert_eq!(ray, bb("a2") | bb("a3") | bb("a4") | bb("a5"));
    }

    #[test]
    fn ray_attack_on_empty_board_runs_to_edge() {
        let ray = bb("a1").ray_attack(Direction::NorthEast, bb("a1"));
        assert_eq!(ray.count(), 7);
        assert!(ray.contains(Square::H8));
    }

    #[test]
    fn xray_sees_past_first_blocker() {
        let occupied = bb("a1") | bb("a3") | bb("a6");
        let xray = bb("a1").xray(Direction::North, occupied);
        assert_eq!(xray, bb("a4") | bb("a5") | bb("a6"));

        let clear = bb("a1").xray(Direction::East, occupied);
        assert_eq!(clear, Bitboard::EMPTY);
    }

    #[test]
    fn singles_enumerates_each_square_once() {
        let board = bb("a1") | bb("e4") | bb("h8");
        let parts: Vec<Bitboard> = board.singles().collect();
        assert_eq!(parts, vec![bb("a1"), bb("e4"), bb("h8")]);
        assert_eq!(Bitboard::EMPTY.singles().count(), 0);
    }

    #[test]
    fn rank_and_file_masks() {
        assert_eq!(Bitboard::rank(Rank::R1), Bitboard::RANK_1);
        assert_eq!(Bitboard::rank(Rank::R8), Bitboard::RANK_8);
        assert_eq!(Bitboard::file(File::H), Bitboard::FILE_H);
        assert_eq!(Bitboard::rank(Rank::R4).count(), 8);
    }

    #[test]
    fn bitboard_iterator() {
        let squares: Vec<Square> = Bitboard::FILE_A.into_iter().collect();
        assert_eq!(squares.len(), 8);
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[7], Square::A8);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn singles_partition_the_board(bits in any::<u64>()) {
                let board = Bitboard(bits);
                let parts: Vec<Bitboard> = board.singles().collect();
                prop_assert_eq!(parts.len() as u32, board.count());
                prop_assert!(parts.iter().all(|p| p.count() == 1));
                let joined = parts.iter().fold(Bitboard::EMPTY, |acc, p| acc | *p);
                prop_assert_eq!(joined, board);
            }

            #[test]
            fn sideways_shifts_never_wrap(bits in any::<u64>()) {
                let board = Bitboard(bits);
                for dir in [Direction::East, Direction::NorthEast, Direction::SouthEast] {
                    prop_assert!(!board.shift(dir).intersects(Bitboard::FILE_A));
                }
                for dir in [Direction::West, Direction::NorthWest, Direction::SouthWest] {
                    prop_assert!(!board.shift(dir).intersects(Bitboard::FILE_H));
                }
            }

            #[test]
            fn rays_stop_at_the_first_blocker(index in 0u8..64, occupied in any::<u64>()) {
                let Some(square) = Square::from_index(index) else {
                    return Ok(());
                };
                let from = Bitboard::from_square(square);
                let occupied = Bitboard(occupied).and_not(from);
                for dir in Direction::ALL {
                    let ray = from.ray_attack(dir, occupied);
                    prop_assert!((ray & occupied).count() <= 1);
                    prop_assert!(!ray.intersects(from.xray(dir, occupied)));
                }
            }
        }
    }
}
