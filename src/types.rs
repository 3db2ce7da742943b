//! This module defines the core data structures and types used throughout the simulator,
//! including the machine description, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::table::TransitionTable;
use crate::Rule;

/// The boundary symbol marking cells outside the supplied tape content.
pub const BLANK_SYMBOL: char = '$';

/// A machine state identifier.
pub type State = u32;

/// A loaded machine description.
///
/// `num_states` and `num_tuples` are kept as declared in the source. Only `num_tuples`
/// influences loading (as the number of tuples read); neither is cross-checked against
/// the table unless the program is analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Number of states declared in the description.
    pub num_states: u32,
    /// The state the machine starts in.
    pub start_state: State,
    /// States that make the run accepted when the machine halts in them.
    pub accepting: BTreeSet<State>,
    /// Number of tuples declared in the description.
    pub num_tuples: usize,
    /// The transition rules.
    pub table: TransitionTable,
}

impl Program {
    /// Returns `true` if `state` is an accepting state.
    pub fn is_accepting(&self, state: State) -> bool {
        self.accepting.contains(&state)
    }

    /// Renders the description header and table the way `--table` shows it.
    pub fn describe(&self) -> String {
        let accepting = self
            .accepting
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "- Number of states: {}\n- Start state: {}\n- Accepting states: {}\n\nTransition table:\n{}",
            self.num_states, self.start_state, accepting, self.table
        )
    }
}

/// A single transition rule: `(state, read) -> (write, movement, next_state)`.
///
/// `movement` keeps the raw character from the description. It is only interpreted
/// when the transition is taken, see [`Direction::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub read: char,
    pub write: char,
    pub movement: char,
    pub next_state: State,
}

impl Transition {
    /// The `(state, symbol)` key this transition is stored under.
    pub fn key(&self) -> (State, char) {
        (self.state, self.read)
    }

    /// Decodes the movement character.
    pub fn direction(&self) -> Result<Direction, TuringMachineError> {
        Direction::try_from(self.movement).map_err(|movement| TuringMachineError::InvalidMovement {
            movement,
            state: self.state,
            symbol: self.read,
        })
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.state, self.read, self.write, self.movement, self.next_state
        )
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl TryFrom<char> for Direction {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            'S' => Ok(Direction::Stay),
            other => Err(other),
        }
    }
}

/// Represents the outcome of an execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a step and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// Why the machine stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// No rule matches the current state and symbol.
    Ok,
    /// A taken rule could not be applied.
    Err(TuringMachineError),
}

/// Final outcome of a run that halted normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("ACCEPTED"),
            Verdict::Rejected => f.write_str("REJECTED"),
        }
    }
}

/// Represents various errors that can occur while loading or running a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A resource name breaks the naming rule, or a field is missing or malformed.
    #[error("Format error: {0}")]
    FormatError(String),
    /// A syntax error in a machine description.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A resource could not be opened or read.
    #[error("File error: {0}")]
    FileError(String),
    /// A taken transition carries a movement other than `L`, `R` or `S`.
    #[error("Invalid movement '{movement}' in transition ({state}, {symbol}): must be 'L', 'R' or 'S'")]
    InvalidMovement {
        movement: char,
        state: State,
        symbol: char,
    },
    /// Strict loading rejected the program.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// The opt-in step limit was reached before the machine halted.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
}

impl TuringMachineError {
    /// Returns `true` for errors raised while loading a machine or tape.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            TuringMachineError::FormatError(_)
                | TuringMachineError::ParseError(_)
                | TuringMachineError::FileError(_)
        )
    }
}
