//! This module provides the `DescriptionLoader` struct, responsible for loading machine
//! descriptions from files and strings.

use crate::parser::parse;
use crate::types::{Description, MachineError};
use std::fs;
use std::path::{Path, PathBuf};

/// `DescriptionLoader` is a utility struct for loading machine descriptions.
/// It provides methods to load descriptions from individual files, from string
/// content, and to discover and load all `.tm` files within a directory.
pub struct DescriptionLoader;

impl DescriptionLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Errors
    ///
    /// * [`MachineError::File`] if the file cannot be read.
    /// * [`MachineError::Parse`] / [`MachineError::Validation`] if the file
    ///   content is not a valid description.
    pub fn load(path: &Path) -> Result<Description, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine description from the provided string content.
    ///
    /// Useful for descriptions that are not stored in files, e.g. user input.
    pub fn load_from_string(content: &str) -> Result<Description, MachineError> {
        parse(content)
    }

    /// Loads all machine description files (`.tm` extension) from a directory.
    ///
    /// Directories and non-`.tm` files are skipped. Each returned element is
    /// the outcome for one candidate file, so one malformed description does
    /// not hide the rest.
    pub fn load_all(directory: &Path) -> Vec<Result<(PathBuf, Description), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.tm files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "tm") {
                    return None;
                }

                match Self::load(&path) {
                    Ok(description) => Some(Ok((path, description))),
                    Err(e) => Some(Err(MachineError::File(format!(
                        "failed to load description from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
