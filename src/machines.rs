//! Embedded machine descriptions and the registry that exposes them by index
//! or name.

use crate::types::{Machine, NtmError};

use std::sync::RwLock;

// Default embedded machines
const MACHINE_TEXTS: [&str; 3] = [
    include_str!("../machines/a-star.csv"),
    include_str!("../machines/contains-ab.csv"),
    include_str!("../machines/even-as.csv"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<Machine>> = RwLock::new(Vec::new());
}

pub struct MachineManager;

impl MachineManager {
    /// Parses the embedded machine tables into the shared registry.
    pub fn load() -> Result<(), NtmError> {
        let mut machines = Vec::new();

        for text in MACHINE_TEXTS {
            machines.push(crate::parser::parse(text)?);
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(NtmError::File(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of embedded machines
    pub fn count() -> usize {
        // Initialize with embedded machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn machine_by_index(index: usize) -> Option<Machine> {
        // Initialize with embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .ok()
            .and_then(|machines| machines.get(index).cloned())
    }

    /// Get a machine by its name
    pub fn machine_by_name(name: &str) -> Option<Machine> {
        // Initialize with embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .ok()
            .and_then(|machines| machines.iter().find(|m| m.name == name).cloned())
    }

    /// List all embedded machine names
    pub fn names() -> Vec<String> {
        // Initialize with embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|m| m.name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get summary information about a machine by its index
    pub fn machine_info(index: usize) -> Option<MachineInfo> {
        let machine = Self::machine_by_index(index)?;

        let mut states: Vec<&str> = machine
            .transitions
            .iter()
            .flat_map(|t| [t.current_state.as_str(), t.next_state.as_str()])
            .chain([
                machine.start_state.as_str(),
                machine.accept_state.as_str(),
                machine.reject_state.as_str(),
            ])
            .collect();
        states.sort_unstable();
        states.dedup();

        Some(MachineInfo {
            index,
            name: machine.name.clone(),
            start_state: machine.start_state.to_string(),
            state_count: states.len(),
            transition_count: machine.transitions.len(),
        })
    }

    /// Get the original table text of an embedded machine by its index
    pub fn text_by_index(index: usize) -> Option<&'static str> {
        MACHINE_TEXTS.get(index).copied()
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::{Explorer, Terminal};
    use crate::reporter::{summarize, Outcome};

    #[test]
    fn test_registry_initialization() {
        let result = MachineManager::load();
        assert!(result.is_ok());

        assert_eq!(MachineManager::count(), 3);
    }

    #[test]
    fn test_machine_names() {
        let names = MachineManager::names();
        assert!(names.contains(&"all a's".to_string()));
        assert!(names.contains(&"contains ab".to_string()));
        assert!(names.contains(&"even number of a's".to_string()));
    }

    #[test]
    fn test_machine_by_index_bounds() {
        assert!(MachineManager::machine_by_index(0).is_some());
        assert!(MachineManager::machine_by_index(999).is_none());
    }

    #[test]
    fn test_machine_by_name() {
        let machine = MachineManager::machine_by_name("all a's").unwrap();
        assert_eq!(machine.start_state.as_str(), "q0");

        assert!(MachineManager::machine_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_machine_info() {
        let info = MachineManager::machine_info(1).unwrap();
        assert_eq!(info.name, "contains ab");
        assert_eq!(info.transition_count, 4);
        assert_eq!(info.state_count, 4);

        assert!(MachineManager::machine_info(999).is_none());
    }

    #[test]
    fn test_text_by_index() {
        let text = MachineManager::text_by_index(0).unwrap();
        assert!(text.starts_with("all a's"));
        assert!(MachineManager::text_by_index(999).is_none());
    }

    #[test]
    fn test_embedded_machines_include_a_nondeterministic_one() {
        let machine = MachineManager::machine_by_name("contains ab").unwrap();
        let table = machine.table();

        let matches = table.lookup(&crate::types::State::from("q0"), 'a');
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_all_a_machine_accepts_and_rejects() {
        let machine = MachineManager::machine_by_name("all a's").unwrap();
        let explorer = Explorer::new(&machine);

        let accepted = explorer.explore("aaa", 20).unwrap();
        assert!(matches!(accepted.terminal, Terminal::Accepted { .. }));

        let rejected = explorer.explore("ab", 20).unwrap();
        assert_eq!(rejected.terminal, Terminal::AllRejected);
    }

    #[test]
    fn test_contains_ab_machine_traces_an_accepting_path() {
        let machine = MachineManager::machine_by_name("contains ab").unwrap();
        let exploration = Explorer::new(&machine).explore("bab", 20).unwrap();
        let trace = summarize(&machine, "bab", &exploration);

        assert_eq!(trace.outcome, Outcome::Accepted);
        let path = trace.accepting_path.unwrap();
        assert_eq!(path.len(), trace.depth_reached + 1);
        assert_eq!(
            path.last().unwrap().state,
            crate::types::State::from("qacc")
        );
    }

    #[test]
    fn test_even_as_machine_parity() {
        let machine = MachineManager::machine_by_name("even number of a's").unwrap();
        let explorer = Explorer::new(&machine);

        let even = explorer.explore("aa", 20).unwrap();
        assert!(matches!(even.terminal, Terminal::Accepted { .. }));

        let odd = explorer.explore("a", 20).unwrap();
        assert_eq!(odd.terminal, Terminal::AllRejected);
    }
}
