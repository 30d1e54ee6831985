//! This module defines the [`TransitionTable`]: a dense (state × symbol) map
//! from machine configuration to [`Instruction`].

use crate::types::{Direction, Instruction, MachineError, RuleLine, ALPHABET_SIZE};

/// A total transition function over `states × 128` ASCII symbols.
///
/// Every (state, symbol) pair starts out holding the "no rule" sentinel
/// ([`Instruction::missing`]) and explicit entries overwrite it. Installing
/// the same key twice keeps the later entry; duplicates are not diagnosed.
///
/// Unlike the raw two-dimensional array this models, all indexing is range
/// checked: an out-of-range state or non-ASCII symbol is a reported error,
/// never an out-of-bounds access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    states: usize,
    entries: Vec<Instruction>,
}

impl TransitionTable {
    /// Creates a table for `states` states with every entry set to the
    /// "no rule" sentinel.
    pub fn new(states: usize) -> Result<Self, MachineError> {
        if states == 0 {
            return Err(MachineError::Validation(
                "machine must declare at least one state".to_string(),
            ));
        }

        Ok(Self {
            states,
            entries: vec![Instruction::missing(); states * ALPHABET_SIZE],
        })
    }

    /// Returns the number of states this table was sized for.
    pub fn states(&self) -> usize {
        self.states
    }

    /// Installs or overwrites the rule for `(state, read)`.
    ///
    /// `state` must lie in `[0, states)` and both symbols must be ASCII;
    /// anything else is a reported error and leaves the table unchanged.
    /// `next_state` is not range checked here: a rule may legitimately name
    /// the end state, which can sit outside the table (the run loop halts
    /// before ever using it as a key). A bad next state surfaces on the
    /// lookup that would follow it.
    pub fn set(
        &mut self,
        state: i64,
        read: char,
        write: char,
        direction: Direction,
        next_state: i64,
    ) -> Result<(), MachineError> {
        let state = self.check_state(state)?;
        if !write.is_ascii() {
            return Err(MachineError::NonAsciiSymbol(write));
        }

        let index = self.index(state, read)?;
        self.entries[index] = Instruction {
            write,
            direction: Some(direction),
            next_state,
        };

        Ok(())
    }

    /// Installs one parsed rule line.
    pub fn install(&mut self, rule: &RuleLine) -> Result<(), MachineError> {
        self.set(rule.state, rule.read, rule.write, rule.direction, rule.next_state)
    }

    /// Returns the entry for `(state, symbol)`: the installed rule, or the
    /// "no rule" sentinel if none was set.
    pub fn get(&self, state: usize, symbol: char) -> Result<&Instruction, MachineError> {
        let index = self.index(state, symbol)?;
        Ok(&self.entries[index])
    }

    fn check_state(&self, state: i64) -> Result<usize, MachineError> {
        usize::try_from(state)
            .ok()
            .filter(|&s| s < self.states)
            .ok_or(MachineError::StateOutOfRange {
                state,
                states: self.states,
            })
    }

    fn index(&self, state: usize, symbol: char) -> Result<usize, MachineError> {
        if state >= self.states {
            return Err(MachineError::StateOutOfRange {
                state: state as i64,
                states: self.states,
            });
        }
        if !symbol.is_ascii() {
            return Err(MachineError::NonAsciiSymbol(symbol));
        }

        Ok(state * ALPHABET_SIZE + symbol as usize)
    }
}
