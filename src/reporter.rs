//! This module turns a completed exploration into a consumable report:
//! terminal-outcome classification, accepting-path reconstruction, and the
//! text rendering of the final summary.

use serde::{Deserialize, Serialize};

use crate::explorer::{Exploration, Terminal};
use crate::types::{Configuration, Machine};

/// Terminal classification of a run. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Some branch reached the accept state.
    Accepted,
    /// Every branch ended in the reject state.
    AllRejected,
    /// The depth ceiling was hit with live branches remaining.
    DepthExhausted,
}

/// The complete result of tracing a machine on one input.
///
/// `accepting_path` is present only for accepted runs: the chain of
/// configurations from level 0 down to the first accepting configuration in
/// scan order, each reachable from its predecessor by one transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub machine_name: String,
    pub input_string: String,
    /// Index of the deepest tree level produced.
    pub depth_reached: usize,
    /// Transition applications performed, implicit rejects included.
    pub total_transitions: usize,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepting_path: Option<Vec<Configuration>>,
    /// Every level of the configuration tree, in production order.
    pub tree: Vec<Vec<Configuration>>,
}

impl Trace {
    /// Renders the trace as the familiar text report. The full configuration
    /// tree is included only when `include_tree` is set; it grows
    /// geometrically with the machine's branching factor.
    pub fn render(&self, include_tree: bool) -> String {
        let mut lines = vec![
            format!("Machine name: {}", self.machine_name),
            format!("Initial string: {}", self.input_string),
            format!("Configuration tree depth: {}", self.depth_reached),
            format!("Total transitions simulated: {}", self.total_transitions),
            String::new(),
        ];

        match self.outcome {
            Outcome::Accepted => {
                lines.push(format!(
                    "String accepted in {} transitions",
                    self.depth_reached
                ));
                if let Some(path) = &self.accepting_path {
                    lines.push("Configuration path:".to_string());
                    for config in path {
                        lines.push(format!("  {config}"));
                    }
                }
            }
            Outcome::AllRejected => {
                lines.push(format!(
                    "All configurations rejected at a depth of {}",
                    self.depth_reached
                ));
            }
            Outcome::DepthExhausted => {
                lines.push(format!(
                    "Execution stopped after reaching max tree depth: {}",
                    self.depth_reached
                ));
            }
        }

        if include_tree {
            lines.push(String::new());
            lines.push("Configuration tree:".to_string());
            for (depth, level) in self.tree.iter().enumerate() {
                let configs = level
                    .iter()
                    .map(Configuration::to_string)
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(format!("  {depth}: {configs}"));
            }
        }

        lines.join("\n")
    }
}

/// Builds the final [`Trace`] from a completed exploration.
pub fn summarize(machine: &Machine, input: &str, exploration: &Exploration) -> Trace {
    let (outcome, accepting_path) = match exploration.terminal {
        Terminal::Accepted { level, index } => (
            Outcome::Accepted,
            Some(accepting_path(exploration, level, index)),
        ),
        Terminal::AllRejected => (Outcome::AllRejected, None),
        Terminal::DepthExhausted => (Outcome::DepthExhausted, None),
    };

    Trace {
        machine_name: machine.name.clone(),
        input_string: input.to_string(),
        depth_reached: exploration.depth,
        total_transitions: exploration.total_transitions,
        outcome,
        accepting_path,
        tree: exploration
            .levels
            .iter()
            .map(|level| level.iter().map(|node| node.config.clone()).collect())
            .collect(),
    }
}

/// Walks parent indices from the accepting configuration back to level 0 and
/// returns the ancestry in forward order.
fn accepting_path(exploration: &Exploration, level: usize, index: usize) -> Vec<Configuration> {
    let mut path = Vec::with_capacity(level + 1);
    let mut position = index;

    for depth in (0..=level).rev() {
        let node = &exploration.levels[depth][position];
        path.push(node.config.clone());
        position = node.parent.unwrap_or(0);
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::Explorer;
    use crate::types::{Direction, State, Transition};

    fn t(current: &str, read: char, next: &str, write: char, direction: Direction) -> Transition {
        Transition {
            current_state: State::from(current),
            read,
            next_state: State::from(next),
            write,
            direction,
        }
    }

    fn machine(transitions: Vec<Transition>) -> Machine {
        Machine {
            name: "reporter test".to_string(),
            start_state: State::from("q0"),
            accept_state: State::from("qacc"),
            reject_state: State::from("qrej"),
            transitions,
        }
    }

    fn trace_for(machine: &Machine, input: &str, max_depth: usize) -> Trace {
        let exploration = Explorer::new(machine).explore(input, max_depth).unwrap();
        summarize(machine, input, &exploration)
    }

    #[test]
    fn test_accepting_path_is_a_one_step_chain() {
        let machine = machine(vec![
            t("q0", 'a', "q1", 'X', Direction::Right),
            t("q1", 'a', "qacc", 'Y', Direction::Right),
        ]);
        let trace = trace_for(&machine, "aa", 10);

        assert_eq!(trace.outcome, Outcome::Accepted);
        assert_eq!(trace.depth_reached, 2);

        let path = trace.accepting_path.as_ref().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Configuration::initial(State::from("q0"), "aa"));
        assert_eq!(path[1], Configuration::new("X", State::from("q1"), "a"));
        assert_eq!(path[2], Configuration::new("XY", State::from("qacc"), "_"));
    }

    #[test]
    fn test_accepting_path_follows_first_branch_in_scan_order() {
        // Both alternatives accept at the same depth; the path must follow
        // the transition listed first in the source table.
        let machine = machine(vec![
            t("q0", 'a', "qacc", 'F', Direction::Right),
            t("q0", 'a', "qacc", 'S', Direction::Right),
        ]);
        let trace = trace_for(&machine, "a", 10);

        let path = trace.accepting_path.as_ref().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].left, "F");
    }

    #[test]
    fn test_rejected_trace_has_no_path() {
        let machine = machine(vec![t("q0", 'a', "q1", 'a', Direction::Right)]);
        let trace = trace_for(&machine, "", 10);

        assert_eq!(trace.outcome, Outcome::AllRejected);
        assert_eq!(trace.depth_reached, 1);
        assert!(trace.accepting_path.is_none());
        assert_eq!(trace.tree.len(), 2);
    }

    #[test]
    fn test_render_accepted_report() {
        let machine = machine(vec![t("q0", 'a', "qacc", 'a', Direction::Right)]);
        let trace = trace_for(&machine, "a", 10);
        let report = trace.render(false);

        assert!(report.contains("Machine name: reporter test"));
        assert!(report.contains("Initial string: a"));
        assert!(report.contains("Configuration tree depth: 1"));
        assert!(report.contains("Total transitions simulated: 1"));
        assert!(report.contains("String accepted in 1 transitions"));
        assert!(report.contains("Configuration path:"));
        assert!(report.contains("[q0]a"));
        assert!(!report.contains("Configuration tree:"));
    }

    #[test]
    fn test_render_depth_exhausted_report_with_tree() {
        let machine = machine(vec![t("q0", '_', "q0", '_', Direction::Right)]);
        let trace = trace_for(&machine, "", 3);
        let report = trace.render(true);

        assert!(report.contains("Execution stopped after reaching max tree depth: 3"));
        assert!(report.contains("Configuration tree:"));
        assert!(report.contains("  0: [q0]"));
        assert!(report.contains("  3: "));
    }

    #[test]
    fn test_trace_json_round_trip() {
        let machine = machine(vec![t("q0", 'a', "qacc", 'a', Direction::Right)]);
        let trace = trace_for(&machine, "a", 10);

        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn test_json_omits_absent_accepting_path() {
        let machine = machine(vec![t("q0", 'a', "q1", 'a', Direction::Right)]);
        let trace = trace_for(&machine, "", 10);

        let json = serde_json::to_string(&trace).unwrap();
        assert!(!json.contains("accepting_path"));

        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }
}
