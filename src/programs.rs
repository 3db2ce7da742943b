use crate::types::{Program, State, TuringMachineError};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

// Default embedded machines
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    ("replace-a", include_str!("../machines/replace-a.tm")),
    ("even-ones", include_str!("../machines/even-ones.tm")),
    ("binary-increment", include_str!("../machines/binary-increment.tm")),
    ("endless-right", include_str!("../machines/endless-right.tm")),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: RwLock<Vec<(String, Program)>> = RwLock::new(Vec::new());
}

/// Summary of a built-in machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: State,
    pub accepting_states: Vec<State>,
    pub state_count: u32,
    pub transition_count: usize,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Parses the embedded machines into [`PROGRAMS`], once.
    pub fn load() -> Result<(), TuringMachineError> {
        let mut write_guard = PROGRAMS.write().map_err(|_| {
            TuringMachineError::FileError("Failed to acquire write lock".to_string())
        })?;

        if !write_guard.is_empty() {
            return Ok(());
        }

        for (name, text) in PROGRAM_TEXTS {
            match crate::parser::parse(text) {
                Ok(program) => write_guard.push((name.to_string(), program)),
                Err(e) => tracing::error!(program = name, error = %e, "failed to parse built-in machine"),
            }
        }

        Ok(())
    }

    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        let _ = Self::load();

        PROGRAMS.read().map(|programs| programs.len()).unwrap_or(0)
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|(_, program)| program.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map_err(|_| TuringMachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(program_name, _)| program_name == name)
            .map(|(_, program)| program.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        let _ = Self::load();

        PROGRAMS
            .read()
            .map(|programs| programs.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;
        let name = Self::list_program_names()
            .get(index)
            .cloned()
            .unwrap_or_default();

        Ok(ProgramInfo {
            index,
            name,
            start_state: program.start_state,
            accepting_states: program.accepting.iter().copied().collect(),
            state_count: program.num_states,
            transition_count: program.table.len(),
        })
    }
}
