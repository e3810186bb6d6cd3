//! This module drives the simulation itself: breadth-first, level-synchronous
//! expansion of nondeterministic machine configurations, from the initial
//! configuration until acceptance, total rejection, or the depth limit.

use crate::table::TransitionTable;
use crate::types::{Configuration, Machine, NtmError, State, DEFAULT_MAX_CONFIGURATIONS};

/// One node in the configuration tree: a configuration plus the index of its
/// parent within the previous level. Level-0 nodes have no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub config: Configuration,
    pub parent: Option<usize>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// An accept-state configuration was found at `level`, position `index`
    /// within that level (first in scan order).
    Accepted { level: usize, index: usize },
    /// Every configuration in the last scanned level was in the reject state.
    AllRejected,
    /// The depth ceiling was reached with live branches remaining.
    DepthExhausted,
}

/// A completed exploration: the full configuration tree plus run counters.
///
/// Invariants: `levels[0]` holds exactly the initial configuration, each
/// level derives entirely from the one before it, and `depth` always equals
/// the index of the last level produced. Distinct branches that reach an
/// identical configuration stay distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    /// Configurations reachable after exactly n steps, per level n.
    pub levels: Vec<Vec<Node>>,
    /// Index of the deepest level produced.
    pub depth: usize,
    /// Transition applications performed, counting synthesized
    /// implicit-reject transitions.
    pub total_transitions: usize,
    /// Why the run stopped.
    pub terminal: Terminal,
}

/// Expands the configuration tree of a machine on a given input.
///
/// The explorer owns the indexed transition table and the three
/// distinguished states; each call to [`Explorer::explore`] performs one
/// full, deterministic run. Enumeration order is fixed: levels in order,
/// configurations within a level in order, and candidate transitions in
/// source-table order.
pub struct Explorer {
    table: TransitionTable,
    start_state: State,
    accept_state: State,
    reject_state: State,
    max_configurations: usize,
}

impl Explorer {
    /// Creates an explorer for the given machine with the default
    /// configuration ceiling.
    pub fn new(machine: &Machine) -> Self {
        Self {
            table: machine.table(),
            start_state: machine.start_state.clone(),
            accept_state: machine.accept_state.clone(),
            reject_state: machine.reject_state.clone(),
            max_configurations: DEFAULT_MAX_CONFIGURATIONS,
        }
    }

    /// Overrides the ceiling on total retained configurations. Exploration
    /// fails with [`NtmError::ResourceLimit`] instead of exhausting memory
    /// once the tree outgrows it.
    pub fn with_max_configurations(mut self, limit: usize) -> Self {
        self.max_configurations = limit;
        self
    }

    /// Runs the machine on `input`, exploring at most `max_depth` levels
    /// beyond the initial configuration.
    ///
    /// Each level is processed in three phases: an all-rejected check over
    /// the current level, an in-order scan that either detects acceptance or
    /// expands every live configuration, and the append of the generated
    /// children as the next level. A configuration with no applicable
    /// transition contributes a single child forced into the reject state,
    /// counted as one transition application like any other.
    pub fn explore(&self, input: &str, max_depth: usize) -> Result<Exploration, NtmError> {
        let initial = Configuration::initial(self.start_state.clone(), input);
        let mut levels = vec![vec![Node {
            config: initial,
            parent: None,
        }]];

        let mut depth = 0;
        let mut total_transitions = 0;
        let mut retained = 1;
        let mut accepted: Option<(usize, usize)> = None;
        let mut all_rejected = false;

        while depth < max_depth {
            let current = &levels[depth];

            if current
                .iter()
                .all(|node| node.config.state == self.reject_state)
            {
                all_rejected = true;
                break;
            }

            let mut children = Vec::new();

            for (index, node) in current.iter().enumerate() {
                if node.config.state == self.accept_state {
                    // One accepting branch is enough; the rest of the level
                    // is not expanded.
                    accepted = Some((depth, index));
                    break;
                }

                if node.config.state == self.reject_state {
                    continue;
                }

                let head = node.config.head_symbol();
                let matches = self.table.lookup(&node.config.state, head);

                if matches.is_empty() {
                    // Implicit reject: same tape, state forced to reject.
                    children.push(Node {
                        config: Configuration::new(
                            node.config.left.clone(),
                            self.reject_state.clone(),
                            node.config.right.clone(),
                        ),
                        parent: Some(index),
                    });
                    total_transitions += 1;
                } else {
                    for transition in matches {
                        children.push(Node {
                            config: node.config.apply(transition),
                            parent: Some(index),
                        });
                        total_transitions += 1;
                    }
                }
            }

            if accepted.is_some() {
                break;
            }

            retained += children.len();
            if retained > self.max_configurations {
                return Err(NtmError::ResourceLimit {
                    limit: self.max_configurations,
                    depth,
                });
            }

            levels.push(children);
            depth += 1;
        }

        // Acceptance can surface in the very last level produced before the
        // depth cutoff; that level was never scanned for expansion.
        if accepted.is_none() {
            let last = levels.len() - 1;
            accepted = levels[last]
                .iter()
                .position(|node| node.config.state == self.accept_state)
                .map(|index| (last, index));
        }

        let terminal = match accepted {
            Some((level, index)) => Terminal::Accepted { level, index },
            None if all_rejected => Terminal::AllRejected,
            None => Terminal::DepthExhausted,
        };

        Ok(Exploration {
            levels,
            depth,
            total_transitions,
            terminal,
        })
    }
}
