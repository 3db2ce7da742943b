//! This module provides functions for analyzing machine descriptions to detect problems the
//! loader tolerates: state ids beyond the declared count, rules overridden by a later
//! duplicate, and movements that would abort the run if taken.

use crate::types::{Direction, Program, State, Transition, TuringMachineError};
use std::collections::BTreeSet;

/// Represents the problems that can be found during the analysis of a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// State ids that are not below the declared number of states.
    StatesOutOfRange(Vec<State>),
    /// Rules replaced by a later rule with the same `(state, symbol)` key.
    DuplicateTransitions(Vec<(State, char)>),
    /// Rules whose movement is not `L`, `R` or `S`.
    InvalidMovements(Vec<Transition>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        TuringMachineError::ValidationError(error.to_string())
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::StatesOutOfRange(states) => {
                write!(f, "States outside the declared state count: {:?}", states)
            }
            AnalysisError::DuplicateTransitions(keys) => {
                write!(f, "Transitions overridden by a later duplicate: {:?}", keys)
            }
            AnalysisError::InvalidMovements(transitions) => {
                let rules = transitions
                    .iter()
                    .map(|t| format!("({t})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Transitions with an invalid movement: {}", rules)
            }
        }
    }
}

/// Analyzes a `Program` and returns the first problem found as a
/// `TuringMachineError::ValidationError`.
pub fn analyze(program: &Program) -> Result<(), TuringMachineError> {
    match diagnostics(program).into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Runs every check and collects all problems found.
pub fn diagnostics(program: &Program) -> Vec<AnalysisError> {
    [
        check_state_range,
        check_duplicate_transitions,
        check_movements,
    ]
    .iter()
    .filter_map(|f| f(program).err())
    .collect()
}

/// Checks that every state mentioned (start, accepting, and both ends of each rule) is
/// below the declared `num_states`.
fn check_state_range(program: &Program) -> Result<(), AnalysisError> {
    let mut states = BTreeSet::new();
    states.insert(program.start_state);
    states.extend(program.accepting.iter().copied());
    for transition in program.table.iter() {
        states.insert(transition.state);
        states.insert(transition.next_state);
    }

    let out_of_range: Vec<State> = states
        .into_iter()
        .filter(|&state| state >= program.num_states)
        .collect();

    if out_of_range.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::StatesOutOfRange(out_of_range))
    }
}

fn check_duplicate_transitions(program: &Program) -> Result<(), AnalysisError> {
    let overridden = program.table.overridden();
    if overridden.is_empty() {
        return Ok(());
    }

    Err(AnalysisError::DuplicateTransitions(
        overridden.iter().map(Transition::key).collect(),
    ))
}

fn check_movements(program: &Program) -> Result<(), AnalysisError> {
    let invalid: Vec<Transition> = program
        .table
        .iter()
        .filter(|t| Direction::try_from(t.movement).is_err())
        .copied()
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidMovements(invalid))
    }
}
