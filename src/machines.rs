//! Embedded sample machine descriptions and the catalog that serves them
//! by name or index.

use crate::parser::parse;
use crate::types::{Description, MachineError};

/// One embedded sample machine: its catalog name and description text.
pub struct BuiltinMachine {
    /// The name the machine is looked up by.
    pub name: &'static str,
    /// The raw description text, in the same format loaded from files.
    pub text: &'static str,
}

lazy_static::lazy_static! {
    /// The embedded sample machines, in catalog order.
    pub static ref MACHINES: Vec<BuiltinMachine> = vec![
        BuiltinMachine {
            name: "binary-increment",
            text: include_str!("../machines/binary-increment.tm"),
        },
        BuiltinMachine {
            name: "bit-flipper",
            text: include_str!("../machines/bit-flipper.tm"),
        },
        BuiltinMachine {
            name: "busy-beaver-2",
            text: include_str!("../machines/busy-beaver-2.tm"),
        },
    ];
}

/// Lookup front end for the embedded machines.
pub struct MachineCatalog;

impl MachineCatalog {
    /// Returns the number of embedded machines.
    pub fn count() -> usize {
        MACHINES.len()
    }

    /// Lists the names of all embedded machines, in catalog order.
    pub fn names() -> Vec<&'static str> {
        MACHINES.iter().map(|machine| machine.name).collect()
    }

    /// Parses and returns the embedded machine with the given name.
    pub fn get(name: &str) -> Result<Description, MachineError> {
        let builtin = MACHINES
            .iter()
            .find(|machine| machine.name == name)
            .ok_or_else(|| {
                MachineError::Validation(format!("no embedded machine named '{}'", name))
            })?;

        parse(builtin.text)
    }

    /// Parses and returns the embedded machine at the given catalog index.
    pub fn get_by_index(index: usize) -> Result<Description, MachineError> {
        let builtin = MACHINES.get(index).ok_or_else(|| {
            MachineError::Validation(format!("embedded machine index {} out of range", index))
        })?;

        parse(builtin.text)
    }
}
