//! Fixed-capacity move list.

use crate::Move;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves held at once.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Move> {
        self.moves[..self.len].get_mut(index)
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Retains moves from index `start` on for which the predicate returns
    /// true; the first `start` moves are left untouched.
    pub(crate) fn retain_from<F>(&mut self, start: usize, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = start;
        for read in start..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write.min(self.len);
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceId;
    use chess_core::{Color, PieceKind, Square};

    fn mv(to: &str) -> Move {
        let from = Square::from_algebraic("b1").unwrap();
        let to = Square::from_algebraic(to).unwrap();
        Move::new(PieceId(1), Color::White, PieceKind::Knight, from, to)
    }

    #[test]
    fn push_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(mv("a3"));
        list.push(mv("c3"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].to, Square::from_algebraic("c3").unwrap());
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn retain_from_keeps_prefix() {
        let mut list = MoveList::default();
        for to in ["a3", "c3", "d2", "a3", "c3"] {
            list.push(mv(to));
        }
        let a3 = Square::from_algebraic("a3").unwrap();
        list.retain_from(2, |m| m.to != a3);
        let kept: Vec<String> = list.iter().map(|m| m.to.to_string()).collect();
        assert_eq!(kept, ["a3", "c3", "d2", "c3"]);

        list.retain_from(0, |m| m.to != a3);
        assert_eq!(list.len(), 3);
    }
}
