//! Scripted replay - applies a fixed sequence of choices to a simulation.

use hazard_core::{EngineState, Simulation, SimulationEngine};
use tracing::{debug, info};

use crate::error::SimError;
use crate::exporter::{Transcript, TranscriptEvent};

/// One entry of a replay script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptItem {
    /// Select the choice with this id
    Choose(String),
    /// Go back to the start step
    Restart,
}

/// Parses a comma-separated script such as `c1,c3,r,c2`.
///
/// `r` (or `restart`) restarts; anything else is a choice id. Blank
/// entries are skipped.
pub fn parse_script(script: &str) -> Vec<ScriptItem> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s {
            "r" | "restart" => ScriptItem::Restart,
            id => ScriptItem::Choose(id.to_string()),
        })
        .collect()
}

/// Results from a replay.
#[derive(Debug, Clone)]
pub struct ReplayResult {
    /// Full transcript, open through close
    pub transcript: Transcript,

    /// State when the script ran out
    pub final_state: EngineState,
}

/// Replays scripts against one simulation.
pub struct ReplayRunner<'a> {
    /// Simulation under test
    simulation: &'a Simulation,

    /// Label used in transcripts and logs
    source: String,
}

impl<'a> ReplayRunner<'a> {
    /// Creates a new replay runner.
    pub fn new(simulation: &'a Simulation, source: impl Into<String>) -> Self {
        Self {
            simulation,
            source: source.into(),
        }
    }

    /// Runs a script and returns the transcript.
    ///
    /// Stops at the first choice that is not on screen; `position` in the
    /// error is the zero-based script index.
    pub fn run(&self, script: &[ScriptItem]) -> Result<ReplayResult, SimError> {
        info!("Replaying {} entries against {}", script.len(), self.source);

        let mut engine = SimulationEngine::open(self.simulation);
        let mut transcript = Transcript::new(&self.source);
        transcript.record(TranscriptEvent::Open, &engine, None);

        for (position, item) in script.iter().enumerate() {
            match item {
                ScriptItem::Restart => {
                    engine.restart();
                    transcript.record(TranscriptEvent::Restart, &engine, None);
                }
                ScriptItem::Choose(id) => {
                    let choice = engine.offered().iter().find(|c| &c.id == id).cloned();
                    engine
                        .choose(id)
                        .map_err(|source| SimError::Replay { position, source })?;
                    transcript.record(TranscriptEvent::Choose, &engine, choice.as_ref());
                }
            }
            debug!("  [{}] {:?} -> {}", position, item, engine.state());
        }

        let final_state = engine.state().clone();
        transcript.record(TranscriptEvent::Close, &engine, None);
        engine.close();

        Ok(ReplayResult {
            transcript,
            final_state,
        })
    }
}
