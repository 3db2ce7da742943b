mod logging;

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tmsim::{
    diagnostics, LoadOptions, Program, ProgramLoader, ProgramManager, RunOptions, Simulation,
    Tape, TuringMachine,
};

/// Simulates a deterministic single-tape Turing machine.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tmsim machines/replace-a.tm demos/a.tape
  tmsim --builtin even-ones --input 1001
  tmsim --list")]
struct Cli {
    /// The machine description file (.tm)
    machine: Option<PathBuf>,

    /// The tape file (.tape)
    tape: Option<PathBuf>,

    /// Run a built-in machine instead of a machine file
    #[clap(short, long, conflicts_with_all = ["machine", "tape"], requires = "input")]
    builtin: Option<String>,

    /// Initial tape content, instead of a tape file
    #[clap(short, long, conflicts_with = "tape")]
    input: Option<String>,

    /// List the built-in machines and exit
    #[clap(long)]
    list: bool,

    /// Show the transition table before simulating
    #[clap(short = 't', long)]
    table: bool,

    /// Ask whether to show the transition table (only when stdin is a terminal)
    #[clap(long)]
    prompt: bool,

    /// Reject machines with out-of-range states, duplicate rules or invalid movements
    #[clap(long)]
    strict: bool,

    /// Give up after this many steps
    #[clap(long)]
    max_steps: Option<usize>,

    /// Print the run report as JSON
    #[clap(long)]
    json: bool,

    /// Only print the verdict
    #[clap(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.list {
        list_programs();
        return Ok(());
    }

    let options = LoadOptions {
        strict: cli.strict,
        ..LoadOptions::default()
    };

    let program = load_program(cli, &options)?;
    if !cli.strict {
        for problem in diagnostics(&program) {
            tracing::warn!("{}", problem);
        }
    }
    let tape = load_tape(cli, &options)?;

    let show_table = cli.table || (cli.prompt && ask_show_table());
    let mut machine = TuringMachine::new(program, tape);
    let run_options = RunOptions {
        max_steps: cli.max_steps,
    };

    if cli.json {
        let simulation = Simulation {
            load: options,
            run: run_options,
            show_table,
        };
        let report = simulation.run_machine(machine)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if show_table {
        println!("{}", machine.program().describe());
    }

    if !cli.quiet {
        println!("Simulating the Turing machine on the given tape");
    }

    let verdict = machine.run_with(&run_options, |snapshot| {
        if !cli.quiet {
            println!("{}", snapshot);
        }
    })?;

    if cli.quiet {
        println!("{}", verdict);
    } else {
        println!("\nString {}", verdict);
    }

    Ok(())
}

fn load_program(cli: &Cli, options: &LoadOptions) -> Result<Program, Box<dyn Error>> {
    match (&cli.builtin, &cli.machine) {
        (Some(name), _) => Ok(ProgramManager::get_program_by_name(name)?),
        (None, Some(path)) => Ok(ProgramLoader::load_program_with(path, options)?),
        (None, None) => Err("a machine file or --builtin is required".into()),
    }
}

fn load_tape(cli: &Cli, options: &LoadOptions) -> Result<Tape, Box<dyn Error>> {
    match (&cli.input, &cli.tape) {
        (Some(content), _) => Ok(Tape::from_content(content)),
        (None, Some(path)) => Ok(ProgramLoader::load_tape_with(path, options)?),
        (None, None) => Err("a tape file or --input is required".into()),
    }
}

fn list_programs() {
    for index in 0..ProgramManager::get_program_count() {
        if let Ok(info) = ProgramManager::get_program_info(index) {
            println!(
                "{:<18} start {} accepting {:?} ({} rules)",
                info.name, info.start_state, info.accepting_states, info.transition_count
            );
        }
    }
}

/// Asks on stdin whether to print the table. Answers starting with y or s mean yes.
fn ask_show_table() -> bool {
    if atty::isnt(atty::Stream::Stdin) {
        return false;
    }

    print!("Show the transition table? (y)es/(n)o: ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().chars().next(), Some('y' | 'Y' | 's' | 'S'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_arguments() {
        let cli = Cli::try_parse_from(["tmsim", "m.tm", "t.tape", "-t", "--max-steps", "10"]).unwrap();

        assert_eq!(cli.machine, Some(PathBuf::from("m.tm")));
        assert_eq!(cli.tape, Some(PathBuf::from("t.tape")));
        assert!(cli.table);
        assert_eq!(cli.max_steps, Some(10));
    }

    #[test]
    fn test_builtin_requires_input() {
        assert!(Cli::try_parse_from(["tmsim", "--builtin", "even-ones"]).is_err());
        assert!(Cli::try_parse_from(["tmsim", "--builtin", "even-ones", "--input", "11"]).is_ok());
    }

    #[test]
    fn test_builtin_conflicts_with_machine_file() {
        let result = Cli::try_parse_from(["tmsim", "m.tm", "--builtin", "even-ones", "-i", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["tmsim", "--list", "-vv"]).unwrap();
        assert_eq!(logging::level_for(cli.verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("s\n"));
        assert!(is_yes(" Yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
