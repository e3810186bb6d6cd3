//! This crate provides the core logic for tracing a nondeterministic Turing
//! Machine. It includes modules for parsing machine description tables,
//! exploring the configuration tree breadth-first across all computation
//! branches, and reporting the outcome with the accepting path when one
//! exists.

pub mod explorer;
pub mod loader;
pub mod machines;
pub mod parser;
pub mod reporter;
pub mod table;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the tree exploration engine and its result types.
pub use explorer::{Exploration, Explorer, Node, Terminal};
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the embedded machine registry.
pub use machines::{MachineInfo, MachineManager, MACHINES};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the trace summary types and constructor.
pub use reporter::{summarize, Outcome, Trace};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the machine description and configuration types.
pub use types::{
    Configuration, Direction, Machine, NtmError, State, Transition, BLANK_SYMBOL,
    DEFAULT_MAX_CONFIGURATIONS,
};
