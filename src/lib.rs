//! This crate provides the core logic for a Turing machine interpreter.
//! It includes the tape and execution engine, a parser for textual machine
//! descriptions, a file loader, and a catalog of embedded sample machines.

pub mod loader;
pub mod machine;
pub mod machines;
pub mod parser;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `DescriptionLoader` struct from the loader module.
pub use loader::DescriptionLoader;
/// Re-exports the `Machine` struct from the machine module.
pub use machine::Machine;
/// Re-exports the embedded machine catalog from the machines module.
pub use machines::{BuiltinMachine, MachineCatalog, MACHINES};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the types describing machines and their execution outcomes.
pub use types::{
    Description, Direction, Instruction, MachineError, Outcome, RuleLine, Step, BLANK_SYMBOL,
};
