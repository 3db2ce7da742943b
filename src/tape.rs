//! The single tape of the machine and its growth policy.
//!
//! The supplied content is wrapped with one [`BLANK_SYMBOL`] on each side. Moving the
//! head past either end grows the tape with a fresh boundary cell, so the head always
//! addresses a real cell and reads never fall outside the sequence.

use crate::types::{Direction, BLANK_SYMBOL};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    head: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// An empty tape: two boundary cells with the head on the right one.
    pub fn new() -> Self {
        Self::from_content("")
    }

    /// Wraps `raw` with one boundary symbol on each end. The head starts on the first
    /// supplied symbol, or on the right boundary when `raw` is empty.
    pub fn from_content(raw: &str) -> Self {
        let mut cells = Vec::with_capacity(raw.len() + 2);
        cells.push(BLANK_SYMBOL);
        cells.extend(raw.chars());
        cells.push(BLANK_SYMBOL);

        Self { cells, head: 1 }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell to the left, inserting a boundary cell when the head is
    /// already on the leftmost cell.
    pub fn move_left(&mut self) {
        if self.head == 0 {
            self.cells.insert(0, BLANK_SYMBOL);
        } else {
            self.head -= 1;
        }
    }

    /// Moves the head one cell to the right, appending a boundary cell when the head
    /// would leave the tape.
    pub fn move_right(&mut self) {
        self.head += 1;
        if self.head >= self.cells.len() {
            self.cells.push(BLANK_SYMBOL);
        }
    }

    pub fn stay(&mut self) {}

    pub fn apply(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Stay => self.stay(),
        }
    }

    /// Current head index into [`Tape::cells`].
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a tape holds at least its two boundary cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// The whole tape, boundary cells included.
    pub fn contents(&self) -> String {
        self.cells.iter().collect()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.contents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tape() {
        let tape = Tape::new();
        assert_eq!(tape.contents(), "$$");
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), BLANK_SYMBOL);
    }

    #[test]
    fn test_from_content() {
        let tape = Tape::from_content("abc");
        assert_eq!(tape.contents(), "$abc$");
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.read(), 'a');
    }

    #[test]
    fn test_from_empty_content_matches_new() {
        assert_eq!(Tape::from_content(""), Tape::new());
    }

    #[test]
    fn test_from_content_accepts_any_symbols() {
        let tape = Tape::from_content("$é1 ");
        assert_eq!(tape.cells(), &['$', '$', 'é', '1', ' ', '$']);
    }

    #[test]
    fn test_write_then_read() {
        let mut tape = Tape::from_content("ab");
        tape.write('x');
        assert_eq!(tape.read(), 'x');
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.contents(), "$xb$");
    }

    #[test]
    fn test_move_right_then_left() {
        let mut tape = Tape::from_content("ab");
        tape.move_right();
        assert_eq!(tape.read(), 'b');
        tape.move_left();
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.contents(), "$ab$");
    }

    #[test]
    fn test_extend_right() {
        let mut tape = Tape::from_content("a");
        tape.move_right(); // right boundary
        assert_eq!(tape.len(), 3);
        tape.move_right(); // past the boundary
        assert_eq!(tape.head(), 3);
        assert_eq!(tape.len(), 4);
        assert_eq!(tape.read(), BLANK_SYMBOL);
        assert_eq!(tape.contents(), "$a$$");
    }

    #[test]
    fn test_extend_left() {
        let mut tape = Tape::from_content("a");
        tape.move_left(); // left boundary
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.len(), 3);
        tape.write('x');
        tape.move_left(); // past the boundary
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.len(), 4);
        assert_eq!(tape.read(), BLANK_SYMBOL);
        assert_eq!(tape.contents(), "$xa$");
    }

    #[test]
    fn test_apply_stay() {
        let mut tape = Tape::from_content("ab");
        tape.apply(Direction::Stay);
        assert_eq!(tape.head(), 1);
        tape.apply(Direction::Right);
        assert_eq!(tape.head(), 2);
        tape.apply(Direction::Left);
        assert_eq!(tape.head(), 1);
    }
}
