//! Seeded random-walk exploration.
//!
//! Each walk opens (restarts) the simulation and picks uniformly among the
//! offered choices until the path ends or the step cap is hit. All choices
//! come from a single ChaCha8 stream, so a seed reproduces a run exactly.

use hazard_core::{Simulation, SimulationEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

use crate::exporter::{Transcript, TranscriptEvent};

/// Results from an exploration.
#[derive(Debug, Clone, Serialize)]
pub struct ExploreReport {
    /// Seed used
    pub seed: u64,

    /// Walks performed
    pub walks: usize,

    /// Step ids in first-visit order
    pub visited: Vec<String>,

    /// Authored steps never visited
    pub unvisited: Vec<String>,

    /// Times each step was on screen
    pub visit_counts: BTreeMap<String, u64>,

    /// Walks that reached End or a dead-end step
    pub ended_walks: usize,

    /// Walks stopped by the step cap (loops)
    pub capped_walks: usize,

    /// Choices applied across all walks
    pub total_choices: u64,
}

/// Explores a simulation with seeded random walks.
pub struct Explorer {
    /// Master seed for determinism
    seed: u64,

    /// Number of walks
    walks: usize,

    /// Choices allowed per walk before giving up
    max_steps: usize,
}

impl Explorer {
    /// Creates a new explorer.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            walks: 100,
            max_steps: 50,
        }
    }

    /// Sets the number of walks.
    pub fn with_walks(mut self, walks: usize) -> Self {
        self.walks = walks;
        self
    }

    /// Sets the per-walk step cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Runs the exploration.
    pub fn run(&self, simulation: &Simulation) -> ExploreReport {
        self.run_recorded(simulation, None)
    }

    /// Runs the exploration, appending every event to `transcript`.
    pub fn run_recorded(
        &self,
        simulation: &Simulation,
        mut transcript: Option<&mut Transcript>,
    ) -> ExploreReport {
        info!(
            "Exploring {} steps: {} walks, cap {} (seed={})",
            simulation.len(),
            self.walks,
            self.max_steps,
            self.seed
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut report = ExploreReport {
            seed: self.seed,
            walks: self.walks,
            visited: Vec::new(),
            unvisited: Vec::new(),
            visit_counts: BTreeMap::new(),
            ended_walks: 0,
            capped_walks: 0,
            total_choices: 0,
        };
        let mut seen: HashSet<String> = HashSet::new();

        let mut engine = SimulationEngine::open(simulation);
        if let Some(t) = transcript.as_deref_mut() {
            t.record(TranscriptEvent::Open, &engine, None);
        }

        for walk in 0..self.walks {
            if walk > 0 {
                engine.restart();
                if let Some(t) = transcript.as_deref_mut() {
                    t.record(TranscriptEvent::Restart, &engine, None);
                }
            }

            let mut ended = false;
            let mut taken = 0;
            loop {
                if let Some(id) = engine.state().step_id() {
                    *report.visit_counts.entry(id.to_string()).or_insert(0) += 1;
                    if seen.insert(id.to_string()) {
                        report.visited.push(id.to_string());
                    }
                }

                let offered = engine.offered();
                if offered.is_empty() {
                    ended = true;
                    break;
                }
                if taken == self.max_steps {
                    break;
                }

                let choice = &offered[rng.gen_range(0..offered.len())];
                // Picked from the offered list, so it is always accepted
                if engine.choose(&choice.id).is_err() {
                    warn!("Offered choice '{}' was rejected", choice.id);
                    break;
                }
                taken += 1;
                report.total_choices += 1;
                if let Some(t) = transcript.as_deref_mut() {
                    t.record(TranscriptEvent::Choose, &engine, Some(choice));
                }
            }

            if ended {
                report.ended_walks += 1;
            } else {
                report.capped_walks += 1;
                if let Some(t) = transcript.as_deref_mut() {
                    t.record(TranscriptEvent::Capped, &engine, None);
                }
            }
            debug!("  walk {} ended={} after {} choices", walk, ended, taken);
        }

        if let Some(t) = transcript {
            t.record(TranscriptEvent::Close, &engine, None);
        }
        engine.close();

        report.unvisited = simulation
            .steps()
            .iter()
            .filter(|s| !seen.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();

        report
    }
}
