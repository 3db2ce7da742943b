//! Loading and running a machine in one call, for front ends that just want the outcome.

use crate::loader::{LoadOptions, ProgramLoader};
use crate::machine::{RunOptions, Snapshot, TuringMachine};
use crate::types::{TuringMachineError, Verdict};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The description header and transition table, when requested.
    pub table: Option<String>,
    /// One configuration per step, starting with the initial one.
    pub snapshots: Vec<Snapshot>,
    pub verdict: Verdict,
}

/// Settings for loading and running a machine.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    pub load: LoadOptions,
    pub run: RunOptions,
    pub show_table: bool,
}

impl Simulation {
    /// Loads the machine description and the tape. Nothing is returned unless both load.
    pub fn machine(
        &self,
        machine_path: &Path,
        tape_path: &Path,
    ) -> Result<TuringMachine, TuringMachineError> {
        let program = ProgramLoader::load_program_with(machine_path, &self.load)?;
        let tape = ProgramLoader::load_tape_with(tape_path, &self.load)?;

        Ok(TuringMachine::new(program, tape))
    }

    /// Loads and runs a machine, collecting the trace.
    pub fn run(&self, machine_path: &Path, tape_path: &Path) -> Result<Report, TuringMachineError> {
        let machine = self.machine(machine_path, tape_path)?;
        self.run_machine(machine)
    }

    /// Runs an already built machine, collecting the trace.
    pub fn run_machine(&self, mut machine: TuringMachine) -> Result<Report, TuringMachineError> {
        let table = self.show_table.then(|| machine.program().describe());

        let mut snapshots = Vec::new();
        let verdict = machine.run_with(&self.run, |snapshot| snapshots.push(snapshot.clone()))?;

        Ok(Report {
            table,
            snapshots,
            verdict,
        })
    }
}

/// Loads `machine_path` and `tape_path` with the default naming rules and runs the machine
/// to completion.
pub fn simulate(
    machine_path: &Path,
    tape_path: &Path,
    show_table: bool,
) -> Result<Report, TuringMachineError> {
    Simulation {
        show_table,
        ..Simulation::default()
    }
    .run(machine_path, tape_path)
}
