//! Reachability analysis over a simulation graph.
//!
//! Walks only edges the engine would actually follow: choices whose
//! `nextStepId` resolves. Sentinel and dangling targets count as ways to
//! finish the path.

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::simulation::Simulation;

/// What a player can reach from the start step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSummary {
    /// Reachable step ids in breadth-first discovery order
    pub reachable: Vec<String>,

    /// Reachable steps without choices
    pub dead_ends: Vec<String>,

    /// Reachable choices that lead to End (sentinel or dangling target)
    pub end_choices: usize,

    /// A loop exists among reachable steps
    pub has_cycle: bool,
}

impl PathSummary {
    pub fn is_reachable(&self, step_id: &str) -> bool {
        self.reachable.iter().any(|id| id == step_id)
    }

    /// True if some path from start terminates.
    pub fn can_finish(&self) -> bool {
        !self.dead_ends.is_empty() || self.end_choices > 0
    }
}

/// Explores the graph from the start step.
///
/// Returns an empty summary if the start step does not exist.
pub fn explore(simulation: &Simulation) -> PathSummary {
    let start = simulation.start_step_id();
    if !simulation.contains(start) {
        return PathSummary::default();
    }

    let mut summary = PathSummary::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    seen.insert(start);
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        let Some(step) = simulation.step(id) else {
            continue;
        };
        summary.reachable.push(step.id.clone());

        if step.is_dead_end() {
            summary.dead_ends.push(step.id.clone());
        }

        for choice in &step.choices {
            match choice.next_step_id.as_deref() {
                Some(next) if simulation.contains(next) => {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
                _ => summary.end_choices += 1,
            }
        }
    }

    summary.has_cycle = has_reachable_cycle(simulation, start);
    summary
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Finished,
}

/// Iterative DFS; a back edge to a step still on the path is a cycle.
fn has_reachable_cycle(simulation: &Simulation, start: &str) -> bool {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
    marks.insert(start, Mark::OnPath);

    while let Some((id, edge)) = stack.pop() {
        let Some(step) = simulation.step(id) else {
            continue;
        };

        let Some(choice) = step.choices.get(edge) else {
            marks.insert(id, Mark::Finished);
            continue;
        };
        stack.push((id, edge + 1));

        let Some(next) = choice.next_step_id.as_deref().filter(|t| simulation.contains(t)) else {
            continue;
        };
        match marks.get(next) {
            Some(Mark::OnPath) => return true,
            Some(Mark::Finished) => {}
            None => {
                marks.insert(next, Mark::OnPath);
                stack.push((next, 0));
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationChoice, SimulationStep};

    #[test]
    fn test_linear_path() {
        let sim = Simulation::new(
            "a",
            vec![
                SimulationStep::new("a", "x", vec![SimulationChoice::to_step("c", "go", "b")]),
                SimulationStep::new("b", "y", vec![]),
                SimulationStep::new("orphan", "z", vec![]),
            ],
        );

        let summary = explore(&sim);
        assert_eq!(summary.reachable, vec!["a", "b"]);
        assert_eq!(summary.dead_ends, vec!["b"]);
        assert_eq!(summary.end_choices, 0);
        assert!(!summary.has_cycle);
        assert!(summary.can_finish());
        assert!(!summary.is_reachable("orphan"));
    }

    #[test]
    fn test_self_loop_is_cycle_without_finish() {
        let sim = Simulation::new(
            "a",
            vec![SimulationStep::new("a", "x", vec![SimulationChoice::to_step("c", "again", "a")])],
        );

        let summary = explore(&sim);
        assert!(summary.has_cycle);
        assert!(!summary.can_finish());
    }

    #[test]
    fn test_diamond_is_not_cycle() {
        let sim = Simulation::new(
            "a",
            vec![
                SimulationStep::new(
                    "a",
                    "x",
                    vec![
                        SimulationChoice::to_step("l", "left", "b"),
                        SimulationChoice::to_step("r", "right", "c"),
                    ],
                ),
                SimulationStep::new("b", "y", vec![SimulationChoice::to_step("n", "on", "d")]),
                SimulationStep::new("c", "y", vec![SimulationChoice::to_step("n", "on", "d")]),
                SimulationStep::new("d", "z", vec![SimulationChoice::to_end("e", "finish")]),
            ],
        );

        let summary = explore(&sim);
        assert_eq!(summary.reachable, vec!["a", "b", "c", "d"]);
        assert!(!summary.has_cycle);
        assert_eq!(summary.end_choices, 1);
    }

    #[test]
    fn test_dangling_counts_as_end() {
        let sim = Simulation::new(
            "a",
            vec![SimulationStep::new("a", "x", vec![SimulationChoice::to_step("c", "go", "nowhere")])],
        );

        let summary = explore(&sim);
        assert_eq!(summary.end_choices, 1);
        assert_eq!(summary.reachable, vec!["a"]);
    }

    #[test]
    fn test_missing_start_is_empty() {
        let sim = Simulation::new("zz", vec![SimulationStep::new("a", "x", vec![])]);
        assert_eq!(explore(&sim), PathSummary::default());
    }
}
