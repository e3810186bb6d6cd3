//! This module provides the `TransitionTable`, an indexed lookup from
//! `(state, tape symbol)` to the ordered set of applicable transitions.

use crate::types::{State, Transition};
use std::collections::HashMap;

/// An indexed view over a machine's transition rules.
///
/// Transitions are grouped by their source state and kept in source-table
/// order within each group, so a lookup enumerates candidates exactly in the
/// order the description listed them. That order decides branch enumeration
/// order in the configuration tree, and therefore which accepting path is
/// discovered first when several exist at the same depth.
///
/// The table is built once per run and read-only afterwards. Nothing here
/// validates that referenced states exist; rules that can never match simply
/// produce empty lookups.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rules: HashMap<State, Vec<Transition>>,
}

impl TransitionTable {
    /// Indexes the given transitions, preserving their relative order.
    pub fn new(transitions: &[Transition]) -> Self {
        let mut rules: HashMap<State, Vec<Transition>> = HashMap::new();

        for transition in transitions {
            rules
                .entry(transition.current_state.clone())
                .or_default()
                .push(transition.clone());
        }

        Self { rules }
    }

    /// Returns every transition applicable to `(state, symbol)`, in
    /// source-table order. The result is empty when no rule matches, which
    /// the explorer treats as an implicit reject.
    pub fn lookup(&self, state: &State, symbol: char) -> Vec<&Transition> {
        self.rules
            .get(state)
            .map(|transitions| {
                transitions
                    .iter()
                    .filter(|transition| transition.read == symbol)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of indexed transitions.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
