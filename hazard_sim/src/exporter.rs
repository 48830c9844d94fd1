//! JSON transcript export.
//!
//! A transcript is the ordered log of one harness run: every open,
//! choice, restart and close, with what was on screen afterwards.

use hazard_core::{SimulationChoice, SimulationEngine};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// What happened at a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptEvent {
    Open,
    Choose,
    Restart,
    Close,
    /// An exploration walk hit its step cap without ending
    Capped,
}

impl TranscriptEvent {
    /// Name used in JSON and terminal output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptEvent::Open => "open",
            TranscriptEvent::Choose => "choose",
            TranscriptEvent::Restart => "restart",
            TranscriptEvent::Close => "close",
            TranscriptEvent::Capped => "capped",
        }
    }
}

impl std::fmt::Display for TranscriptEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub event: TranscriptEvent,

    /// Step on screen after the event (`None` at End)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,

    /// Narrative on screen after the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,

    /// Choice applied, for `choose` events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_text: Option<String>,

    /// The path has ended (End or a dead-end step)
    pub terminal: bool,
}

impl TranscriptEntry {
    /// Snapshots the engine after an event.
    pub fn snapshot(
        event: TranscriptEvent,
        engine: &SimulationEngine<'_>,
        choice: Option<&SimulationChoice>,
    ) -> Self {
        let view = engine.view();
        Self {
            event,
            step_id: engine.state().step_id().map(str::to_string),
            scenario: view.scenario().map(str::to_string),
            choice_id: choice.map(|c| c.id.clone()),
            choice_text: choice.map(|c| c.text.clone()),
            terminal: view.is_terminal(),
        }
    }
}

/// Complete run transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Where the simulation came from
    pub simulation: String,

    /// Seed used, for explorations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// All entries in order
    pub entries: Vec<TranscriptEntry>,

    /// The last entry was terminal
    pub reached_end: bool,

    /// Choices applied over the whole run
    pub steps_taken: usize,
}

impl Transcript {
    /// Creates a new transcript container.
    pub fn new(simulation: &str) -> Self {
        Self {
            simulation: simulation.to_string(),
            seed: None,
            entries: Vec::new(),
            reached_end: false,
            steps_taken: 0,
        }
    }

    /// Sets the exploration seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Records an event with the engine's current screen.
    pub fn record(
        &mut self,
        event: TranscriptEvent,
        engine: &SimulationEngine<'_>,
        choice: Option<&SimulationChoice>,
    ) {
        if event == TranscriptEvent::Choose {
            self.steps_taken += 1;
        }
        let entry = TranscriptEntry::snapshot(event, engine, choice);
        self.reached_end = entry.terminal;
        self.entries.push(entry);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
