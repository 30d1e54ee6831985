//! This module defines the [`Tape`]: an unbounded bidirectional strip of symbols
//! with a movable read/write head and on-demand growth at either end.

use crate::types::BLANK_SYMBOL;
use std::collections::VecDeque;
use std::fmt;

/// A Turing machine tape.
///
/// Conceptually infinite in both directions, but only the visited span is
/// materialized: moving past either physical end inserts one blank cell,
/// which becomes the new end and the head's new position. Backed by a
/// double-ended buffer with an integer head index, so extension on either
/// side is amortized O(1).
///
/// Invariant: the tape is never empty. Construction from an empty symbol
/// sequence seeds a single blank cell, so [`read`](Tape::read) always has
/// a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
}

impl Tape {
    /// Creates a tape from an initial symbol sequence, head on the leftmost cell.
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut cells: VecDeque<char> = symbols.into_iter().collect();
        if cells.is_empty() {
            cells.push_back(BLANK_SYMBOL);
        }

        Self { cells, head: 0 }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell to the left, materializing a blank cell when
    /// the head is already on the leftmost one. Never fails.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            // The new front cell is at index 0, exactly where the head must land.
            self.cells.push_front(BLANK_SYMBOL);
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head one cell to the right, materializing a blank cell when
    /// the head is already on the rightmost one. Never fails.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head == self.cells.len() {
            self.cells.push_back(BLANK_SYMBOL);
        }
    }

    /// Returns the full tape contents from leftmost to rightmost cell.
    /// Does not move the head.
    pub fn snapshot(&self) -> Vec<char> {
        self.cells.iter().copied().collect()
    }

    /// Returns the head position as an index into [`snapshot`](Tape::snapshot).
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false once constructed; the tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_seeds_one_blank() {
        let tape = Tape::new(std::iter::empty());

        assert_eq!(tape.snapshot(), vec![BLANK_SYMBOL]);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), BLANK_SYMBOL);
    }

    #[test]
    fn test_read_write_at_head() {
        let mut tape = Tape::new("011".chars());

        assert_eq!(tape.read(), '0');
        tape.write('1');
        assert_eq!(tape.read(), '1');
        assert_eq!(tape.snapshot(), vec!['1', '1', '1']);
    }

    #[test]
    fn test_write_read_is_idempotent() {
        let mut tape = Tape::new("abc".chars());
        let before = tape.snapshot();

        tape.write(tape.read());

        assert_eq!(tape.snapshot(), before);
    }

    #[test]
    fn test_left_extension_symmetry() {
        let mut tape = Tape::new("01".chars());
        let initial_len = tape.len();

        let n = 4;
        for _ in 0..n {
            tape.move_left();
        }

        let snapshot = tape.snapshot();
        assert_eq!(snapshot.len(), initial_len + n);
        assert!(snapshot[..n].iter().all(|&c| c == BLANK_SYMBOL));
        assert_eq!(&snapshot[n..], ['0', '1']);
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_right_extension_symmetry() {
        let mut tape = Tape::new("01".chars());
        let initial_len = tape.len();

        // Walk to the rightmost existing cell first, then extend.
        tape.move_right();
        assert_eq!(tape.len(), initial_len);

        let n = 4;
        for _ in 0..n {
            tape.move_right();
        }

        let snapshot = tape.snapshot();
        assert_eq!(snapshot.len(), initial_len + n);
        assert_eq!(&snapshot[..2], ['0', '1']);
        assert!(snapshot[2..].iter().all(|&c| c == BLANK_SYMBOL));
        assert_eq!(tape.head(), snapshot.len() - 1);
    }

    #[test]
    fn test_write_lands_before_move() {
        let mut tape = Tape::new("1".chars());

        tape.write('0');
        tape.move_right();

        assert_eq!(tape.snapshot(), vec!['0', BLANK_SYMBOL]);
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), BLANK_SYMBOL);
    }

    #[test]
    fn test_interior_moves_do_not_extend() {
        let mut tape = Tape::new("abc".chars());

        tape.move_right();
        tape.move_right();
        tape.move_left();
        tape.move_left();

        assert_eq!(tape.len(), 3);
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_display_matches_snapshot() {
        let mut tape = Tape::new("01".chars());
        tape.move_left();

        assert_eq!(tape.to_string(), "B01");
        assert_eq!(tape.to_string().chars().collect::<Vec<_>>(), tape.snapshot());
    }
}
