//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//! It defines the grammar for `.tm` files and functions to parse the input into a `Program`
//! struct, plus the reader for the single-token `.tape` format.

use crate::{
    table::TransitionTable,
    types::{Program, State, Transition, TuringMachineError},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Derives a `PestParser` for the machine description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineParser;

/// Parses a machine description into a `Program`.
///
/// Exactly `num_tuples` tuples are taken from the tuple stream. Anything after them is
/// ignored, whether more tuples, a partial tuple or free text; fewer than declared is an
/// error. Movement characters are not checked here.
///
/// # Returns
///
/// * `Ok(Program)` if the input is a well-formed description.
/// * `Err(TuringMachineError::ParseError)` on syntax errors, including a malformed tuple
///   among the declared ones.
/// * `Err(TuringMachineError::FormatError)` when the input ends before the declared
///   tuples.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let root = MachineParser::parse(Rule::program, input)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::FormatError("Empty machine description".into()))?;

    parse_program(root)
}

/// Extracts the initial tape content from a tape description: its first
/// whitespace-delimited token, or the empty string when there is none.
pub fn parse_tape(input: &str) -> &str {
    input.split_whitespace().next().unwrap_or_default()
}

fn parse_program(pair: Pair<Rule>) -> Result<Program, TuringMachineError> {
    let mut num_states = 0;
    let mut start_state = 0;
    let mut accepting = BTreeSet::new();
    let mut num_tuples = 0;
    let mut tuples = Vec::new();
    let mut remainder = None;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::num_states => num_states = parse_int(p)?,
            Rule::start_state => start_state = parse_int(p)?,
            Rule::accepting => {
                for state in p.into_inner() {
                    accepting.insert(parse_number(&state)?);
                }
            }
            Rule::num_tuples => num_tuples = parse_int(p)?,
            Rule::tuples => tuples.extend(p.into_inner()),
            Rule::remainder => remainder = Some(p),
            _ => {} // EOI
        }
    }

    let remainder = remainder.filter(|r| !r.as_str().trim().is_empty());

    if tuples.len() < num_tuples {
        return Err(missing_tuples(num_tuples, tuples.len(), remainder));
    }

    if tuples.len() > num_tuples || remainder.is_some() {
        tracing::debug!(
            declared = num_tuples,
            complete = tuples.len(),
            "ignoring input past the declared tuples"
        );
    }

    let mut table = TransitionTable::new();
    for pair in tuples.into_iter().take(num_tuples) {
        let transition = parse_tuple(pair)?;
        if let Some(previous) = table.insert(transition) {
            tracing::warn!(%previous, replacement = %transition, "duplicate transition key");
        }
    }

    Ok(Program {
        num_states,
        start_state,
        accepting,
        num_tuples,
        table,
    })
}

/// Reports a short tuple stream. When text follows the last complete tuple, the
/// tuple starting there is malformed and the error points at it.
fn missing_tuples(
    declared: usize,
    found: usize,
    remainder: Option<Pair<Rule>>,
) -> TuringMachineError {
    match remainder {
        Some(rest) => TuringMachineError::ParseError(Box::new(Error::new_from_pos(
            ErrorVariant::CustomError {
                message: format!("Malformed tuple {} of {}", found + 1, declared),
            },
            rest.as_span().start_pos(),
        ))),
        None => TuringMachineError::FormatError(format!(
            "Expected {} tuples but found {}",
            declared, found
        )),
    }
}

/// Parses a `state read write movement next` tuple from a `Pair<Rule::tuple>`.
fn parse_tuple(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let mut pairs = pair.into_inner();

    let state: State = parse_number(&next_pair(&mut pairs)?)?;
    let read = parse_char(&mut pairs)?;
    let write = parse_char(&mut pairs)?;
    let movement = parse_char(&mut pairs)?;
    let next_state: State = parse_number(&next_pair(&mut pairs)?)?;

    Ok(Transition {
        state,
        read,
        write,
        movement,
        next_state,
    })
}

/// Parses the single `int` inside a header line rule.
fn parse_int<T: FromStr>(pair: Pair<Rule>) -> Result<T, TuringMachineError> {
    let mut pairs = pair.into_inner();
    parse_number(&next_pair(&mut pairs)?)
}

/// Parses an `int` token, reporting overflow at its position.
fn parse_number<T: FromStr>(pair: &Pair<Rule>) -> Result<T, TuringMachineError> {
    pair.as_str()
        .parse()
        .map_err(|_| parse_error(&format!("Number out of range: {}", pair.as_str()), pair.as_span()))
}

fn parse_char(pairs: &mut Pairs<Rule>) -> Result<char, TuringMachineError> {
    let pair = next_pair(pairs)?;
    pair.as_str()
        .chars()
        .next()
        .ok_or_else(|| parse_error("Expected a symbol", pair.as_span()))
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>) -> Result<Pair<'i, Rule>, TuringMachineError> {
    pairs
        .next()
        .ok_or_else(|| TuringMachineError::FormatError("Truncated tuple".into()))
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
