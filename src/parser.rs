//! This module provides the parser for textual machine descriptions, utilizing the `pest` crate.
//! It defines the line-oriented grammar in `grammar.pest` and functions to parse the input into
//! a [`Description`] struct.

use crate::types::{Description, Direction, MachineError, RuleLine};
use pest::iterators::Pair;
use pest::Parser as PestParser;
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the machine description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Parses the given input string into a [`Description`].
///
/// The format is line oriented: the initial tape on the first line, then the
/// number of states, the declared start state, and the end state on one line
/// each, followed by one rule per line as
/// `<state> <read> <write> <L|R> <next_state>`. Header and rule lines
/// tolerate trailing text after their fields.
///
/// # Errors
///
/// * [`MachineError::Parse`] if the input does not match the grammar.
/// * [`MachineError::Validation`] if it parses but is structurally invalid
///   (no states, or a negative start or end state).
/// * [`MachineError::NonAsciiSymbol`] if a rule reads or writes a symbol
///   outside the ASCII alphabet.
pub fn parse(input: &str) -> Result<Description, MachineError> {
    let root = DescriptionParser::parse(Rule::description, input)
        .map_err(|e| MachineError::Parse(Box::new(e)))?
        .next()
        .unwrap();

    parse_description(root)
}

/// Parses the top-level structure of a description from a `Pair<Rule::description>`.
fn parse_description(pair: Pair<Rule>) -> Result<Description, MachineError> {
    let mut tape = String::new();
    let mut headers: Vec<i64> = Vec::new();
    let mut rules = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::tape_line => tape = p.as_str().to_string(),
            Rule::header_line => headers.push(parse_integer(p.into_inner().next())?),
            Rule::rule_line => rules.push(parse_rule_line(p)?),
            _ => {} // Skip EOI
        }
    }

    // The grammar fixes the header count; anything else is a malformed tree.
    if headers.len() != 3 {
        return Err(MachineError::Validation(
            "expected state count, start state, and end state headers".to_string(),
        ));
    }

    let states = usize::try_from(headers[0]).ok().filter(|&s| s > 0).ok_or_else(|| {
        MachineError::Validation(format!("number of states must be positive, got {}", headers[0]))
    })?;
    let start_state = non_negative(headers[1], "start state")?;
    let end_state = non_negative(headers[2], "end state")?;

    Ok(Description {
        tape,
        states,
        start_state,
        end_state,
        rules,
    })
}

/// Parses one rule line into a [`RuleLine`], rejecting non-ASCII symbols early.
fn parse_rule_line(pair: Pair<Rule>) -> Result<RuleLine, MachineError> {
    let mut inner = pair.into_inner();

    let state = parse_integer(inner.next())?;
    let read = parse_symbol(inner.next())?;
    let write = parse_symbol(inner.next())?;
    let direction = parse_direction(inner.next())?;
    let next_state = parse_integer(inner.next())?;

    for symbol in [read, write] {
        if !symbol.is_ascii() {
            return Err(MachineError::NonAsciiSymbol(symbol));
        }
    }

    Ok(RuleLine {
        state,
        read,
        write,
        direction,
        next_state,
    })
}

fn parse_integer(pair: Option<Pair<Rule>>) -> Result<i64, MachineError> {
    let pair = expect_pair(pair)?;
    pair.as_str()
        .parse::<i64>()
        .map_err(|e| MachineError::Validation(format!("invalid integer '{}': {}", pair.as_str(), e)))
}

fn parse_symbol(pair: Option<Pair<Rule>>) -> Result<char, MachineError> {
    expect_pair(pair)?
        .as_str()
        .chars()
        .next()
        .ok_or_else(|| MachineError::Validation("expected a symbol".to_string()))
}

fn parse_direction(pair: Option<Pair<Rule>>) -> Result<Direction, MachineError> {
    let pair = expect_pair(pair)?;
    match pair.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(MachineError::Validation(format!(
            "invalid move direction '{}'",
            other
        ))),
    }
}

fn expect_pair(pair: Option<Pair<Rule>>) -> Result<Pair<Rule>, MachineError> {
    pair.ok_or_else(|| MachineError::Validation("malformed rule line".to_string()))
}

fn non_negative(value: i64, what: &str) -> Result<usize, MachineError> {
    usize::try_from(value)
        .map_err(|_| MachineError::Validation(format!("{} must be non-negative, got {}", what, value)))
}
