//! This module defines the [`Machine`]: the fetch-decode-execute engine that
//! drives a [`Tape`] through a [`TransitionTable`] until the end state is
//! reached.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Description, Direction, MachineError, Outcome, Step};

/// A deterministic single-tape Turing machine.
///
/// Owns its tape and transition table outright; nothing else aliases them
/// during a run. Execution is fully synchronous: no I/O happens between the
/// first step and the halt, and the run loop itself carries no step bound.
/// Callers that need bounded execution wrap the engine through
/// [`run_bounded`](Machine::run_bounded) rather than relying on the core
/// loop to give up.
#[derive(Debug)]
pub struct Machine {
    state: usize,
    end_state: usize,
    table: TransitionTable,
    tape: Tape,
    step_count: usize,
}

impl Machine {
    /// Builds a machine from a parsed description: sizes the transition
    /// table, installs every rule (later rules overwrite earlier ones for
    /// the same key), and seeds the tape with the initial symbols.
    ///
    /// The description's declared start state is ignored; execution always
    /// begins in state 0.
    pub fn new(description: &Description) -> Result<Self, MachineError> {
        let mut table = TransitionTable::new(description.states)?;
        for rule in &description.rules {
            table.install(rule)?;
        }

        Ok(Self {
            state: 0,
            end_state: description.end_state,
            table,
            tape: Tape::new(description.initial_tape()),
            step_count: 0,
        })
    }

    /// Executes one step: read the symbol under the head, fetch the rule for
    /// (current state, symbol), write, move, and transition.
    ///
    /// The symbol is read before anything is written, and the write lands on
    /// the cell the head occupied at the start of the step; only then does
    /// the head move. Returns [`Step::Halted`] without touching the tape
    /// when the machine is already in its end state.
    ///
    /// # Errors
    ///
    /// * [`MachineError::InvalidDirection`] if no rule was installed for the
    ///   current (state, symbol) pair. The write of the sentinel's blank has
    ///   already landed by then; the partial tape is abandoned with the run.
    /// * [`MachineError::StateOutOfRange`] if the fetched rule names a next
    ///   state that cannot index the table and is not the end state.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.state == self.end_state {
            return Ok(Step::Halted);
        }

        let symbol = self.tape.read();
        let instruction = *self.table.get(self.state, symbol)?;

        self.tape.write(instruction.write);

        match instruction.direction {
            Some(Direction::Left) => self.tape.move_left(),
            Some(Direction::Right) => self.tape.move_right(),
            None => {
                return Err(MachineError::InvalidDirection {
                    state: self.state,
                    symbol,
                })
            }
        }

        self.state = usize::try_from(instruction.next_state).map_err(|_| {
            MachineError::StateOutOfRange {
                state: instruction.next_state,
                states: self.table.states(),
            }
        })?;
        self.step_count += 1;

        Ok(Step::Continue)
    }

    /// Runs the machine until it reaches its end state.
    ///
    /// There is no step limit and no cycle detection: a description whose
    /// machine never reaches the end state and never hits a missing rule
    /// runs forever. Use [`run_bounded`](Machine::run_bounded) to impose a
    /// budget.
    pub fn run(&mut self) -> Result<(), MachineError> {
        loop {
            match self.step()? {
                Step::Continue => {}
                Step::Halted => return Ok(()),
            }
        }
    }

    /// Runs at most `max_steps` steps, reporting whether the machine halted
    /// within the budget. A driver-side policy wrapper around [`step`](Machine::step);
    /// the core loop itself stays unbounded.
    pub fn run_bounded(&mut self, max_steps: usize) -> Result<Outcome, MachineError> {
        for _ in 0..max_steps {
            if let Step::Halted = self.step()? {
                return Ok(Outcome::Halted);
            }
        }

        // The budget may run out on the exact step that entered the end
        // state; that still counts as a halt.
        if self.is_halted() {
            Ok(Outcome::Halted)
        } else {
            Ok(Outcome::StepLimit)
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> usize {
        self.state
    }

    /// Returns the end state.
    pub fn end_state(&self) -> usize {
        self.end_state
    }

    /// Returns the number of steps executed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns true if the machine is in its end state.
    pub fn is_halted(&self) -> bool {
        self.state == self.end_state
    }

    /// Returns the tape, for snapshots before, during, and after a run.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RuleLine, BLANK_SYMBOL};

    fn rule(state: i64, read: char, write: char, direction: Direction, next_state: i64) -> RuleLine {
        RuleLine {
            state,
            read,
            write,
            direction,
            next_state,
        }
    }

    fn description(
        tape: &str,
        states: usize,
        end_state: usize,
        rules: Vec<RuleLine>,
    ) -> Description {
        Description {
            tape: tape.to_string(),
            states,
            start_state: 0,
            end_state,
            rules,
        }
    }

    #[test]
    fn test_start_in_end_state_runs_zero_steps() {
        let desc = description("abc", 1, 0, Vec::new());
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().snapshot(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_single_step_writes_before_moving() {
        let desc = description(
            "1",
            1,
            1,
            vec![rule(0, '1', '0', Direction::Right, 1)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['0', BLANK_SYMBOL]);
        assert_eq!(machine.tape().head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_binary_increment_table() {
        // Head starts on the leftmost '0'; the very first step rewrites it
        // to '1' and transitions straight to the end state, so every cell
        // ends up '1'.
        let desc = description(
            "011",
            2,
            1,
            vec![
                rule(0, '1', '1', Direction::Right, 0),
                rule(0, '0', '1', Direction::Right, 1),
                rule(0, 'B', '1', Direction::Left, 1),
            ],
        );
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['1', '1', '1']);
        assert_eq!(machine.step_count(), 1);
        assert!(machine.is_halted());
    }

    #[test]
    fn test_missing_rule_is_fatal_on_first_step() {
        let desc = description(
            "X",
            1,
            1,
            vec![rule(0, 'a', 'a', Direction::Right, 0)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        let err = machine.run().unwrap_err();
        assert_eq!(
            err,
            MachineError::InvalidDirection {
                state: 0,
                symbol: 'X',
            }
        );
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_declared_start_state_is_not_consulted() {
        // If execution honored the declared start state this machine would
        // halt immediately and leave the tape alone.
        let desc = Description {
            tape: "a".to_string(),
            states: 2,
            start_state: 1,
            end_state: 1,
            rules: vec![rule(0, 'a', 'b', Direction::Right, 1)],
        };
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['b', BLANK_SYMBOL]);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_two_state_busy_beaver() {
        // Two working states plus an end state, empty initial tape. Halts
        // after six steps with four ones written.
        let desc = description(
            "",
            3,
            2,
            vec![
                rule(0, 'B', '1', Direction::Right, 1),
                rule(0, '1', '1', Direction::Left, 1),
                rule(1, 'B', '1', Direction::Left, 0),
                rule(1, '1', '1', Direction::Right, 2),
            ],
        );
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['1', '1', '1', '1']);
        assert_eq!(machine.step_count(), 6);
    }

    #[test]
    fn test_end_state_outside_the_table_still_halts() {
        // The end state holds no rules of its own and sits one past the
        // table; the loop exits before it is ever used as a key.
        let desc = description(
            "",
            1,
            1,
            vec![rule(0, 'B', '1', Direction::Right, 1)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['1', BLANK_SYMBOL]);
    }

    #[test]
    fn test_run_bounded_reports_step_limit() {
        // Shuttles right forever; the end state is unreachable.
        let desc = description(
            "",
            1,
            1,
            vec![rule(0, 'B', 'B', Direction::Right, 0)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        let outcome = machine.run_bounded(10).unwrap();

        assert_eq!(outcome, Outcome::StepLimit);
        assert_eq!(machine.step_count(), 10);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_run_bounded_halt_on_final_budgeted_step() {
        let desc = description(
            "1",
            1,
            1,
            vec![rule(0, '1', '0', Direction::Right, 1)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        assert_eq!(machine.run_bounded(1).unwrap(), Outcome::Halted);
    }

    #[test]
    fn test_negative_next_state_surfaces_on_transition() {
        let desc = description(
            "a",
            1,
            1,
            vec![rule(0, 'a', 'a', Direction::Right, -5)],
        );
        let mut machine = Machine::new(&desc).unwrap();

        let err = machine.run().unwrap_err();
        assert_eq!(err, MachineError::StateOutOfRange { state: -5, states: 1 });
    }

    #[test]
    fn test_rule_state_out_of_range_fails_construction() {
        let desc = description(
            "a",
            1,
            1,
            vec![rule(7, 'a', 'a', Direction::Right, 0)],
        );

        assert_eq!(
            Machine::new(&desc).unwrap_err(),
            MachineError::StateOutOfRange { state: 7, states: 1 }
        );
    }

    #[test]
    fn test_duplicate_rules_keep_the_later_one() {
        let desc = description(
            "a",
            1,
            1,
            vec![
                rule(0, 'a', 'x', Direction::Left, 0),
                rule(0, 'a', 'y', Direction::Right, 1),
            ],
        );
        let mut machine = Machine::new(&desc).unwrap();

        machine.run().unwrap();

        assert_eq!(machine.tape().snapshot(), vec!['y', BLANK_SYMBOL]);
    }
}
