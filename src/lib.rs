//! This crate provides the core logic for a deterministic single-tape Turing machine
//! simulator. It includes modules for parsing machine descriptions and tapes, the
//! transition table and tape abstractions, the step/run engine, program analysis, and a
//! small library of built-in machines.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod simulation;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `diagnostics` functions and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, diagnostics, AnalysisError};
/// Re-exports the loader types.
pub use loader::{LoadOptions, NameRule, ProgramLoader};
/// Re-exports the `TuringMachine` struct and its run options and snapshots.
pub use machine::{RunOptions, Snapshot, TuringMachine};
/// Re-exports the `parse` and `parse_tape` functions from the parser module.
pub use parser::{parse, parse_tape};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the one-call simulation entry points.
pub use simulation::{simulate, Report, Simulation};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Direction, Halt, Program, State, Step, Transition, TuringMachineError, Verdict, BLANK_SYMBOL,
};
