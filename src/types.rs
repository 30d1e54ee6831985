//! This module defines the core data structures and types used throughout the Turing machine
//! interpreter, including machine descriptions, table entries, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The reserved blank symbol written into cells materialized by tape extension.
pub const BLANK_SYMBOL: char = 'B';
/// Size of the symbol alphabet: one table column per ASCII value.
pub const ALPHABET_SIZE: usize = 128;
/// Sentinel next-state value carried by table entries no rule was installed for.
pub const NO_NEXT_STATE: i64 = -1;

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// A single entry of the transition table: what to write, where to move,
/// and which state to enter next.
///
/// Entries no rule was installed for carry `direction: None` and an invalid
/// `next_state`; fetching one during execution is the engine's fatal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// The symbol written over the cell under the head.
    pub write: char,
    /// Head movement after the write, or `None` for the "no rule" sentinel.
    pub direction: Option<Direction>,
    /// The state the machine enters after moving.
    pub next_state: i64,
}

impl Instruction {
    /// The default entry every (state, symbol) pair starts out with.
    pub fn missing() -> Self {
        Self {
            write: BLANK_SYMBOL,
            direction: None,
            next_state: NO_NEXT_STATE,
        }
    }
}

/// One parsed rule line of a machine description, before it is installed
/// into a [`TransitionTable`](crate::table::TransitionTable).
///
/// State fields stay as raw `i64` here; range checking happens when the
/// table is built, so out-of-range indices surface as reported errors
/// rather than silent truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLine {
    /// The state this rule applies in.
    pub state: i64,
    /// The symbol under the head that selects this rule.
    pub read: char,
    /// The symbol to write.
    pub write: char,
    /// Head movement after the write.
    pub direction: Direction,
    /// The state entered after the move.
    pub next_state: i64,
}

/// A complete textual machine description: initial tape, state space bounds,
/// and the rule list in source order.
///
/// Later rules for the same (state, read) pair overwrite earlier ones when
/// the table is built. The declared `start_state` is recorded but execution
/// always begins in state 0 (see [`Machine::new`](crate::machine::Machine::new)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// The initial tape contents, leftmost cell first. May be empty.
    pub tape: String,
    /// Number of states; state identifiers range over `[0, states)`.
    pub states: usize,
    /// The declared start state. Parsed for format compatibility, not
    /// consulted by the engine.
    pub start_state: usize,
    /// The halting state. Reaching it ends the run.
    pub end_state: usize,
    /// The rules, in the order they appeared in the source.
    pub rules: Vec<RuleLine>,
}

impl Description {
    /// Returns the initial tape as a character sequence.
    pub fn initial_tape(&self) -> Vec<char> {
        self.tape.chars().collect()
    }
}

/// Outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and execution continues.
    Continue,
    /// The machine is in its end state; no step was performed.
    Halted,
}

/// Outcome of a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The end state was reached within the step budget.
    Halted,
    /// The step budget ran out before the end state was reached.
    StepLimit,
}

/// Represents the errors that can occur while loading, building, or running
/// a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The rule fetched for the current (state, symbol) pair carries no valid
    /// move direction. This is the "no rule installed" sentinel surfacing at
    /// run time, and the only termination path besides reaching the end state.
    #[error("invalid move direction in state {state} reading '{symbol}': no rule installed for this pair")]
    InvalidDirection {
        /// The state the machine was in when the bad entry was fetched.
        state: usize,
        /// The symbol that was under the head.
        symbol: char,
    },
    /// A state index used as a table key falls outside `[0, states)`.
    #[error("state index {state} out of range (machine has {states} states)")]
    StateOutOfRange {
        /// The offending index, as written in the description.
        state: i64,
        /// The declared number of states.
        states: usize,
    },
    /// A symbol used as a table key falls outside the ASCII alphabet.
    #[error("symbol '{0}' is outside the ASCII alphabet")]
    NonAsciiSymbol(char),
    /// The description text does not match the grammar.
    #[error("description parsing error: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    /// The description parsed but is structurally invalid.
    #[error("description validation error: {0}")]
    Validation(String),
    /// A file could not be read.
    #[error("file error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_instruction_sentinel() {
        let entry = Instruction::missing();

        assert_eq!(entry.write, BLANK_SYMBOL);
        assert_eq!(entry.direction, None);
        assert_eq!(entry.next_state, NO_NEXT_STATE);
    }

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_description_roundtrip() {
        let description = Description {
            tape: "011".to_string(),
            states: 2,
            start_state: 0,
            end_state: 1,
            rules: vec![RuleLine {
                state: 0,
                read: '1',
                write: '1',
                direction: Direction::Right,
                next_state: 0,
            }],
        };

        let json = serde_json::to_string(&description).unwrap();
        let deserialized: Description = serde_json::from_str(&json).unwrap();

        assert_eq!(description, deserialized);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::InvalidDirection {
            state: 3,
            symbol: 'X',
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("state 3"));
        assert!(error_msg.contains('X'));
    }
}
