//! This module defines the `TuringMachine` struct, which runs a deterministic single-tape
//! machine. It owns the tape and the program, tracks the current state, and decides the
//! verdict once no rule applies.

use crate::tape::Tape;
use crate::types::{Halt, Program, State, Step, Transition, TuringMachineError, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for [`TuringMachine::run_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail with `StepLimitExceeded` instead of taking a step past this count.
    /// `None` runs until the machine halts, possibly forever.
    pub max_steps: Option<usize>,
}

/// One machine configuration, as shown in execution traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of steps taken before this configuration.
    pub step: usize,
    pub state: State,
    pub tape: String,
    /// Head index into `tape`, counted in symbols.
    pub head: usize,
}

impl fmt::Display for Snapshot {
    /// Renders the cells left of the head, the state, then the cells from the head on:
    /// `$b q1 $`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let before: String = self.tape.chars().take(self.head).collect();
        let after: String = self.tape.chars().skip(self.head).collect();
        write!(f, "{} q{} {}", before, self.state, after)
    }
}

/// Represents a deterministic single-tape Turing machine.
///
/// The machine exclusively owns its tape and program. Each [`TuringMachine::step`] reads
/// the symbol under the head, looks up the rule for the current state, writes, moves and
/// switches state. A missing rule halts the machine normally; the verdict then depends
/// only on whether the current state is accepting.
pub struct TuringMachine {
    state: State,
    tape: Tape,
    initial_tape: Tape,
    program: Program,
    step_count: usize,
    halted: Option<Halt>,
}

impl TuringMachine {
    /// Creates a machine in the program's start state over `tape`.
    pub fn new(program: Program, tape: Tape) -> Self {
        Self {
            state: program.start_state,
            initial_tape: tape.clone(),
            tape,
            program,
            step_count: 0,
            halted: None,
        }
    }

    /// Executes a single step of the computation.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule was applied.
    /// * `Step::Halt(Halt::Ok)` if no rule matches the current state and symbol.
    /// * `Step::Halt(Halt::Err(_))` if the matching rule has an invalid movement. The
    ///   symbol has already been written at that point; the state is left unchanged.
    ///
    /// Once halted, the machine keeps returning the same halt without touching the tape.
    pub fn step(&mut self) -> Step {
        if let Some(halt) = &self.halted {
            return Step::Halt(halt.clone());
        }

        let symbol = self.tape.read();
        let transition = match self.transition().copied() {
            Some(t) => t,
            None => {
                tracing::debug!(state = self.state, %symbol, "no rule applies");
                return self.halt(Halt::Ok);
            }
        };

        self.tape.write(transition.write);

        let direction = match transition.direction() {
            Ok(direction) => direction,
            Err(e) => {
                tracing::error!(%transition, "invalid movement");
                return self.halt(Halt::Err(e));
            }
        };
        self.tape.apply(direction);

        self.state = transition.next_state;
        self.step_count += 1;

        tracing::debug!(
            step = self.step_count,
            %transition,
            head = self.tape.head(),
            "applied rule"
        );

        Step::Continue
    }

    fn halt(&mut self, halt: Halt) -> Step {
        self.halted = Some(halt.clone());
        Step::Halt(halt)
    }

    /// Runs the machine until it halts. There is no step bound: a machine that never
    /// halts on this tape never returns.
    pub fn run(&mut self) -> Result<Verdict, TuringMachineError> {
        self.run_with(&RunOptions::default(), |_| {})
    }

    /// Runs the machine until it halts, calling `on_step` with the current configuration
    /// first and then after every applied rule.
    ///
    /// # Returns
    ///
    /// * `Ok(Verdict)` once no rule applies. A rejection is a verdict, not an error.
    /// * `Err(TuringMachineError::InvalidMovement)` if a taken rule has a bad movement.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if `options.max_steps` is set and
    ///   the machine would step past it.
    pub fn run_with<F>(
        &mut self,
        options: &RunOptions,
        mut on_step: F,
    ) -> Result<Verdict, TuringMachineError>
    where
        F: FnMut(&Snapshot),
    {
        on_step(&self.snapshot());

        loop {
            if let Some(limit) = options.max_steps {
                if self.step_count >= limit && !self.is_halted() {
                    return Err(TuringMachineError::StepLimitExceeded(limit));
                }
            }

            match self.step() {
                Step::Continue => on_step(&self.snapshot()),
                Step::Halt(Halt::Ok) => break,
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }

        let verdict = self.verdict();
        tracing::info!(state = self.state, steps = self.step_count, %verdict, "machine halted");

        Ok(verdict)
    }

    /// Whether the current state is accepting. Only meaningful once the machine halted.
    pub fn verdict(&self) -> Verdict {
        if self.program.is_accepting(self.state) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Captures the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step_count,
            state: self.state,
            tape: self.tape.contents(),
            head: self.tape.head(),
        }
    }

    /// Finds the rule for the current state and the symbol under the head.
    pub fn transition(&self) -> Option<&Transition> {
        self.program.table.lookup(self.state, self.tape.read())
    }

    /// A machine is halted once a step reported a halt, or when no rule applies to the
    /// current configuration.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some() || self.transition().is_none()
    }

    /// Restores the start state and the initial tape.
    pub fn reset(&mut self) {
        self.state = self.program.start_state;
        self.tape = self.initial_tape.clone();
        self.step_count = 0;
        self.halted = None;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const REPLACE_A: &str = "2\n0\n1\n1\n0 a b R 1\n";

    fn machine(description: &str, tape: &str) -> TuringMachine {
        TuringMachine::new(parse(description).unwrap(), Tape::from_content(tape))
    }

    fn trace(machine: &mut TuringMachine) -> (Vec<String>, Result<Verdict, TuringMachineError>) {
        let mut lines = Vec::new();
        let result = machine.run_with(&RunOptions::default(), |s| lines.push(s.to_string()));
        (lines, result)
    }

    #[test]
    fn test_machine_creation() {
        let machine = machine(REPLACE_A, "a");

        assert_eq!(machine.state(), 0);
        assert_eq!(machine.tape().contents(), "$a$");
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_single_step() {
        let mut machine = machine(REPLACE_A, "a");

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.state(), 1);
        assert_eq!(machine.tape().contents(), "$b$");
        assert_eq!(machine.tape().head(), 2);
        assert_eq!(machine.step_count(), 1);

        assert_eq!(machine.step(), Step::Halt(Halt::Ok));
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_accepted_run() {
        let mut machine = machine(REPLACE_A, "a");
        let (lines, result) = trace(&mut machine);

        assert_eq!(lines, vec!["$ q0 a$", "$b q1 $"]);
        assert_eq!(result, Ok(Verdict::Accepted));
    }

    #[test]
    fn test_rejected_run_halts_immediately() {
        let mut machine = machine(REPLACE_A, "c");
        let (lines, result) = trace(&mut machine);

        assert_eq!(lines, vec!["$ q0 c$"]);
        assert_eq!(result, Ok(Verdict::Rejected));
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.state(), 0);
    }

    #[test]
    fn test_start_state_accepting_without_rules() {
        let mut machine = machine("1\n0\n0\n0\n", "abc");
        assert_eq!(machine.run(), Ok(Verdict::Accepted));
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_empty_accepting_set_never_accepts() {
        let mut machine = machine("2\n0\n\n1\n0 a b R 1\n", "a");
        assert_eq!(machine.run(), Ok(Verdict::Rejected));
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_invalid_movement() {
        let mut machine = machine("2\n0\n1\n1\n0 a b X 1\n", "a");
        let (lines, result) = trace(&mut machine);

        assert_eq!(lines, vec!["$ q0 a$"]);
        assert_eq!(
            result,
            Err(TuringMachineError::InvalidMovement {
                movement: 'X',
                state: 0,
                symbol: 'a',
            })
        );

        // The write happens before the movement is decoded; the state does not change.
        assert_eq!(machine.tape().contents(), "$b$");
        assert_eq!(machine.state(), 0);

        // Further steps repeat the halt without touching the tape.
        assert!(matches!(machine.step(), Step::Halt(Halt::Err(_))));
        assert_eq!(machine.tape().contents(), "$b$");
    }

    #[test]
    fn test_invalid_movement_not_taken() {
        // The bad rule is never reached on this tape.
        let mut machine = machine("2\n0\n0\n1\n0 z z X 1\n", "a");
        assert_eq!(machine.run(), Ok(Verdict::Accepted));
    }

    #[test]
    fn test_moves_left_past_start() {
        // Walk left off the supplied content, writing markers.
        let mut machine = machine("3\n0\n2\n2\n0 a x L 1\n1 $ y L 2\n", "a");
        let (lines, result) = trace(&mut machine);

        assert_eq!(result, Ok(Verdict::Accepted));
        assert_eq!(lines, vec!["$ q0 a$", " q1 $x$", " q2 $yx$"]);
        assert_eq!(machine.tape().contents(), "$yx$");
        assert_eq!(machine.tape().head(), 0);
    }

    #[test]
    fn test_moves_right_past_end() {
        let mut machine = machine("2\n0\n1\n2\n0 a a R 0\n0 $ # R 1\n", "aa");
        assert_eq!(machine.run(), Ok(Verdict::Accepted));
        assert_eq!(machine.tape().contents(), "$aa#$");
        assert_eq!(machine.tape().head(), 4);
    }

    #[test]
    fn test_stay_movement() {
        let mut machine = machine("2\n0\n1\n1\n0 a b S 1\n", "a");
        assert_eq!(machine.run(), Ok(Verdict::Accepted));
        assert_eq!(machine.tape().head(), 1);
        assert_eq!(machine.snapshot().to_string(), "$ q1 b$");
    }

    #[test]
    fn test_deterministic_runs() {
        let description = "3\n0\n2\n5\n0 0 0 R 0\n0 1 1 R 1\n1 0 0 R 1\n1 1 1 R 0\n0 $ $ S 2\n";

        let (first_trace, first) = trace(&mut machine(description, "1011"));
        let (second_trace, second) = trace(&mut machine(description, "1011"));

        assert_eq!(first_trace, second_trace);
        assert_eq!(first, second);
        assert_eq!(first, Ok(Verdict::Rejected));
    }

    #[test]
    fn test_step_limit() {
        let mut machine = machine("1\n0\n0\n1\n0 $ $ R 0\n", "");
        let options = RunOptions { max_steps: Some(25) };

        let result = machine.run_with(&options, |_| {});
        assert_eq!(result, Err(TuringMachineError::StepLimitExceeded(25)));
        assert_eq!(machine.step_count(), 25);
        assert_eq!(machine.tape().len(), 27);
    }

    #[test]
    fn test_step_limit_not_hit_when_halting_on_time() {
        let mut machine = machine(REPLACE_A, "a");
        let options = RunOptions { max_steps: Some(1) };

        assert_eq!(machine.run_with(&options, |_| {}), Ok(Verdict::Accepted));
    }

    #[test]
    fn test_reset() {
        let mut machine = machine(REPLACE_A, "a");
        machine.run().unwrap();

        machine.reset();
        assert_eq!(machine.state(), 0);
        assert_eq!(machine.tape().contents(), "$a$");
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.run(), Ok(Verdict::Accepted));
    }

    #[test]
    fn test_snapshot_serialization() {
        let machine = machine(REPLACE_A, "a");
        let json = serde_json::to_string(&machine.snapshot()).unwrap();
        assert_eq!(json, r#"{"step":0,"state":0,"tape":"$a$","head":1}"#);
    }
}
