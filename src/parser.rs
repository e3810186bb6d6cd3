//! This module provides the parser for machine description tables, utilizing
//! the `pest` crate. The format is a CSV-like table: seven header rows
//! (machine name, state list, input alphabet, tape alphabet, start state,
//! accept state, reject state) followed by one five-field row per transition.

use crate::types::{Direction, Machine, NtmError, State, Transition};
use pest::{iterators::Pair, Parser as PestParser, Span};
use pest_derive::Parser as PestParser;

/// Number of header rows preceding the transition rows.
const HEADER_ROWS: usize = 7;
/// Fields in a transition row: current state, read symbol, next state,
/// write symbol, direction.
const TRANSITION_FIELDS: usize = 5;

/// Derives a `PestParser` for the machine table grammar defined in
/// `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineParser;

/// Parses the given table text into a `Machine`.
///
/// This is the main entry point for parsing machine descriptions. Grammar
/// failures surface as [`NtmError::Parse`]; structural defects (missing
/// header rows, wrong transition field counts, multi-character symbols,
/// unknown direction tokens) surface as [`NtmError::MalformedSpec`].
///
/// Transition order in the returned machine follows the table row order; the
/// explorer's branch enumeration depends on it.
pub fn parse(input: &str) -> Result<Machine, NtmError> {
    let root = MachineParser::parse(Rule::file, input.trim())
        .map_err(|e| NtmError::Parse(e.into()))? //
        .next()
        .unwrap();

    parse_machine(root)
}

/// Splits the parse tree into rows, assigns the positional header roles, and
/// converts the remaining rows into transitions.
fn parse_machine(pair: Pair<Rule>) -> Result<Machine, NtmError> {
    let mut rows = Vec::new();

    for row in pair.into_inner() {
        if row.as_rule() != Rule::row {
            continue;
        }

        let span = row.as_span();
        let fields: Vec<String> = row
            .into_inner()
            .map(|field| field.as_str().trim().to_string())
            .collect();

        // Lines holding only whitespace parse as a single empty field.
        if fields.iter().all(String::is_empty) {
            continue;
        }

        rows.push((fields, span));
    }

    if rows.len() < HEADER_ROWS {
        return Err(NtmError::MalformedSpec(format!(
            "Expected {} header rows (name, states, input alphabet, tape alphabet, \
             start, accept, reject), found {} rows in total",
            HEADER_ROWS,
            rows.len()
        )));
    }

    // Rows 1-3 list the machine's states and alphabets; like the head
    // symbols themselves they are not needed to drive the simulation.
    let name = rows[0].0[0].clone();
    let start_state = State::from(rows[4].0[0].as_str());
    let accept_state = State::from(rows[5].0[0].as_str());
    let reject_state = State::from(rows[6].0[0].as_str());

    let transitions = rows[HEADER_ROWS..]
        .iter()
        .map(|(fields, span)| parse_transition(fields, *span))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Machine {
        name,
        start_state,
        accept_state,
        reject_state,
        transitions,
    })
}

/// Parses one transition row:
/// `current_state, read, next_state, write, direction`.
fn parse_transition(fields: &[String], span: Span) -> Result<Transition, NtmError> {
    if fields.len() != TRANSITION_FIELDS {
        return Err(malformed(
            format!(
                "Transition row has {} fields, expected {}",
                fields.len(),
                TRANSITION_FIELDS
            ),
            span,
        ));
    }

    Ok(Transition {
        current_state: State::from(fields[0].as_str()),
        read: parse_symbol(&fields[1], span)?,
        next_state: State::from(fields[2].as_str()),
        write: parse_symbol(&fields[3], span)?,
        direction: parse_direction(&fields[4], span)?,
    })
}

/// Parses a single tape symbol; anything but exactly one character is a
/// malformed row.
fn parse_symbol(field: &str, span: Span) -> Result<char, NtmError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(malformed(
            format!("Tape symbol must be a single character, got {field:?}"),
            span,
        )),
    }
}

/// Parses a direction token. Supports '<' or 'L' for Left and '>' or 'R'
/// for Right.
fn parse_direction(token: &str, span: Span) -> Result<Direction, NtmError> {
    match token {
        "<" | "L" => Ok(Direction::Left),
        ">" | "R" => Ok(Direction::Right),
        _ => Err(malformed(format!("Unsupported direction: {token}"), span)),
    }
}

/// Creates a `NtmError::MalformedSpec` pointing at the offending row.
fn malformed(msg: String, span: Span) -> NtmError {
    let (line, _) = span.start_pos().line_col();
    NtmError::MalformedSpec(format!("line {line}: {msg}"))
}
