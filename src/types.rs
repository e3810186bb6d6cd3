//! This module defines the core data structures and types used throughout the
//! nondeterministic Turing Machine tracer: machine descriptions, transitions,
//! branch configurations, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The blank tape symbol. The tape is conceptually infinite and filled with
/// this symbol beyond the explored region; machine descriptions use it to
/// write blanks and to match an exhausted tape.
pub const BLANK_SYMBOL: char = '_';
/// Default ceiling on the total number of configurations retained across all
/// tree levels before exploration aborts with [`NtmError::ResourceLimit`].
pub const DEFAULT_MAX_CONFIGURATIONS: usize = 1_000_000;

/// A machine control state.
///
/// States are a distinct identifier type rather than bare strings so they can
/// never be confused with tape content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// A single transition rule.
///
/// Several transitions may share the same `(current_state, read)` pair; that
/// is the machine's source of nondeterminism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the machine must be in for this transition to apply.
    pub current_state: State,
    /// The symbol that must be under the head.
    pub read: char,
    /// The state the machine moves to.
    pub next_state: State,
    /// The symbol written over the head cell.
    pub write: char,
    /// Where the head moves afterwards.
    pub direction: Direction,
}

/// A fully-parsed machine description: the input record the tracer consumes.
///
/// `accept_state` and `reject_state` are taken on trust from the description;
/// nothing here verifies that they are distinct or reachable. A description
/// whose transitions never match simply rejects implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// The name of the machine.
    pub name: String,
    /// The state the initial configuration starts in.
    pub start_state: State,
    /// Reaching this state in any branch accepts the input.
    pub accept_state: State,
    /// Branches in this state are dead; a configuration with no applicable
    /// transition is forced into it.
    pub reject_state: State,
    /// All transition rules, in source-table order.
    pub transitions: Vec<Transition>,
}

impl Machine {
    /// Builds the indexed transition table for this machine.
    pub fn table(&self) -> crate::table::TransitionTable {
        crate::table::TransitionTable::new(&self.transitions)
    }
}

/// A snapshot of one computation branch: the tape to the left of the head,
/// the control state, and the tape from the head rightward.
///
/// `right` starts at the head, so its first symbol is the cell currently
/// being read; when `right` is empty the head sits on blank tape.
/// Configurations are never mutated after creation - every transition
/// produces a brand-new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Tape content left of the head, read left-to-right from the tape start.
    pub left: String,
    /// The branch's control state.
    pub state: State,
    /// Tape content from the head rightward; `right[0]` is the head cell.
    pub right: String,
}

impl Configuration {
    pub fn new(left: impl Into<String>, state: State, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            state,
            right: right.into(),
        }
    }

    /// The configuration every exploration starts from: an empty left tape,
    /// the start state, and the input string under and right of the head.
    pub fn initial(start_state: State, input: &str) -> Self {
        Self::new("", start_state, input)
    }

    /// The symbol under the head. An exhausted right tape reads as blank.
    pub fn head_symbol(&self) -> char {
        self.right.chars().next().unwrap_or(BLANK_SYMBOL)
    }

    /// Applies one transition, producing the successor configuration.
    ///
    /// Moving right appends the written symbol to `left` and drops the head
    /// cell from `right`, padding with a single blank when the tape runs out.
    /// Moving left pulls the last symbol of `left` in front of the written
    /// symbol; at the left edge of the tape the head clamps in place and only
    /// the written symbol is kept.
    pub fn apply(&self, transition: &Transition) -> Self {
        // Everything to the right of the head cell, which this transition
        // overwrites.
        let mut rest = self.right.chars();
        rest.next();
        let rest = rest.as_str();

        match transition.direction {
            Direction::Right => {
                let mut left = self.left.clone();
                left.push(transition.write);

                let right = if rest.is_empty() {
                    BLANK_SYMBOL.to_string()
                } else {
                    rest.to_string()
                };

                Self::new(left, transition.next_state.clone(), right)
            }
            Direction::Left => {
                let mut left = self.left.chars();
                let moved = left.next_back();
                let left = left.as_str().to_string();

                let mut right = String::with_capacity(rest.len() + 2);
                if let Some(symbol) = moved {
                    right.push(symbol);
                }
                right.push(transition.write);
                right.push_str(rest);

                Self::new(left, transition.next_state.clone(), right)
            }
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]{}", self.left, self.state, self.right)
    }
}

/// Represents the errors that can occur while loading or tracing a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NtmError {
    /// The machine description table is structurally broken: missing header
    /// rows, a transition row with the wrong field count, a multi-character
    /// tape symbol, or an unrecognized direction token.
    #[error("Malformed machine description: {0}")]
    MalformedSpec(String),
    /// The machine description failed to parse at the grammar level.
    #[error("Machine parsing error: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    /// Exploration was aborted because the configuration tree outgrew the
    /// configured ceiling.
    #[error("Configuration limit of {limit} exceeded while expanding depth {depth}")]
    ResourceLimit { limit: usize, depth: usize },
    /// A file system failure while loading a machine description.
    #[error("File error: {0}")]
    File(String),
}
