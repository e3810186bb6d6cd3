//! This module provides the `MachineLoader` struct, responsible for loading
//! machine descriptions from various sources, including files and strings.

use crate::parser::parse;
use crate::types::{Machine, NtmError};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension recognized when scanning a directory for machine tables.
const MACHINE_EXTENSION: &str = "csv";

/// `MachineLoader` is a utility struct for loading machine descriptions.
/// It provides methods to load a machine from an individual file, from string
/// content, and to discover and load all machine tables within a directory.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is successfully read and parsed.
    /// * `Err(NtmError::File)` if the file cannot be read.
    /// * `Err(NtmError::Parse)` or `Err(NtmError::MalformedSpec)` if the
    ///   content is not a valid machine table.
    pub fn load_machine(path: &Path) -> Result<Machine, NtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtmError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine description from the provided string content.
    ///
    /// This is useful for machine tables that are not stored in files, e.g.,
    /// from user input.
    pub fn load_machine_from_string(content: &str) -> Result<Machine, NtmError> {
        parse(content)
    }

    /// Loads all machine table files (`.csv` extension) from a directory.
    ///
    /// It iterates through the directory, attempts to load each matching
    /// file, and collects the results. Directories and files with other
    /// extensions are skipped.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Machine), NtmError>>` - one entry per
    ///   candidate file, carrying either the loaded machine with its path or
    ///   the error that file produced.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Machine), NtmError>> {
        if !directory.exists() {
            return vec![Err(NtmError::File(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NtmError::File(format!(
                    "Failed to read directory {}: {}",
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
                        return Some(Err(NtmError::File(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and files with other extensions
                if path.is_dir()
                    || path
                        .extension()
                        .is_none_or(|ext| ext != MACHINE_EXTENSION)
                {
                    return None;
                }

                match Self::load_machine(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(NtmError::File(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
