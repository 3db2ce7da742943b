//! This module provides the `ProgramLoader` struct, responsible for loading machine
//! descriptions and tapes from files and strings.
//!
//! A resource is only read when its name satisfies a [`NameRule`]. By default machine
//! descriptions must end in `.tm` and tapes in `.tape`.

use crate::analyzer::analyze;
use crate::parser::{parse, parse_tape};
use crate::tape::Tape;
use crate::types::{Program, TuringMachineError};
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static::lazy_static! {
    static ref MACHINE_SUFFIX: Regex = Regex::new(r"\.tm$").unwrap();
    static ref TAPE_SUFFIX: Regex = Regex::new(r"\.tape$").unwrap();
    static ref ANY_NAME: Regex = Regex::new("").unwrap();
}

/// A naming convention a resource path must satisfy before it is read.
#[derive(Debug, Clone)]
pub struct NameRule {
    pattern: Regex,
    expected: String,
}

impl NameRule {
    /// Builds a rule from a regular expression matched against the path.
    /// `expected` describes the convention in error messages.
    pub fn new(pattern: &str, expected: impl Into<String>) -> Result<Self, TuringMachineError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            TuringMachineError::ValidationError(format!("Invalid naming rule '{}': {}", pattern, e))
        })?;

        Ok(Self {
            pattern,
            expected: expected.into(),
        })
    }

    /// Machine descriptions: `<name>.tm`.
    pub fn machine() -> Self {
        Self {
            pattern: MACHINE_SUFFIX.clone(),
            expected: "<filename>.tm".into(),
        }
    }

    /// Tape descriptions: `<name>.tape`.
    pub fn tape() -> Self {
        Self {
            pattern: TAPE_SUFFIX.clone(),
            expected: "<filename>.tape".into(),
        }
    }

    /// Accepts every path.
    pub fn any() -> Self {
        Self {
            pattern: ANY_NAME.clone(),
            expected: "any file".into(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.is_match(&path.to_string_lossy())
    }

    /// Fails with a format error when `path` breaks the rule.
    pub fn check(&self, path: &Path) -> Result<(), TuringMachineError> {
        if self.matches(path) {
            Ok(())
        } else {
            Err(TuringMachineError::FormatError(format!(
                "{} does not have the expected name, it should be {}",
                path.display(),
                self.expected
            )))
        }
    }
}

/// Options controlling how resources are accepted.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub machine_rule: NameRule,
    pub tape_rule: NameRule,
    /// Reject programs the analyzer finds problems in.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            machine_rule: NameRule::machine(),
            tape_rule: NameRule::tape(),
            strict: false,
        }
    }
}

/// `ProgramLoader` is a utility struct for loading machine descriptions and tapes.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a machine description with the default options.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        Self::load_program_with(path, &LoadOptions::default())
    }

    /// Loads a machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is named correctly, readable, and well-formed.
    /// * `Err(TuringMachineError::FormatError)` if the name breaks the naming rule.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ParseError)` if the content is not a valid description.
    /// * `Err(TuringMachineError::ValidationError)` if `options.strict` is set and the
    ///   program fails analysis.
    pub fn load_program_with(
        path: &Path,
        options: &LoadOptions,
    ) -> Result<Program, TuringMachineError> {
        options.machine_rule.check(path)?;
        let content = read(path)?;

        let program = parse(&content)?;
        tracing::info!(
            path = %path.display(),
            states = program.num_states,
            rules = program.table.len(),
            "loaded machine"
        );

        if options.strict {
            analyze(&program)?;
        }

        Ok(program)
    }

    /// Loads a tape with the default options.
    pub fn load_tape(path: &Path) -> Result<Tape, TuringMachineError> {
        Self::load_tape_with(path, &LoadOptions::default())
    }

    /// Loads a tape description: its first whitespace-delimited token wrapped with
    /// boundary symbols.
    pub fn load_tape_with(path: &Path, options: &LoadOptions) -> Result<Tape, TuringMachineError> {
        options.tape_rule.check(path)?;
        let content = read(path)?;

        let tape = Tape::from_content(parse_tape(&content));
        tracing::info!(path = %path.display(), cells = tape.len(), "loaded tape");

        Ok(tape)
    }
}

fn read(path: &Path) -> Result<String, TuringMachineError> {
    fs::read_to_string(path).map_err(|e| {
        TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}
