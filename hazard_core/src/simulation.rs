//! Branching simulation graph: steps, choices and the start pointer.
//!
//! A [`Simulation`] is stored inside a lecture document as an ordered array
//! of steps. In memory it keeps that order (for listings and analysis) plus
//! an id index so the engine can resolve `nextStepId` in O(1).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::DocumentError;

/// A user-selectable option on a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationChoice {
    /// Unique within the owning step
    pub id: String,

    /// Label shown on the choice control
    pub text: String,

    /// Target step, or `None` for the end sentinel.
    ///
    /// Serialized as `null`; a missing key also decodes as the end sentinel.
    #[serde(default)]
    pub next_step_id: Option<String>,
}

impl SimulationChoice {
    /// Creates a choice leading to another step.
    pub fn to_step(id: impl Into<String>, text: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_step_id: Some(next.into()),
        }
    }

    /// Creates a choice that ends the path.
    pub fn to_end(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_step_id: None,
        }
    }

    /// True if this choice carries the end sentinel.
    pub fn is_end(&self) -> bool {
        self.next_step_id.is_none()
    }
}

/// One scenario/prompt node in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub id: String,

    /// Narrative text shown at this step
    pub scenario: String,

    /// Display order is the array order
    #[serde(default)]
    pub choices: Vec<SimulationChoice>,
}

impl SimulationStep {
    /// Creates a step with the given choices.
    pub fn new(
        id: impl Into<String>,
        scenario: impl Into<String>,
        choices: Vec<SimulationChoice>,
    ) -> Self {
        Self {
            id: id.into(),
            scenario: scenario.into(),
            choices,
        }
    }

    /// A step without choices renders exactly like the End state.
    pub fn is_dead_end(&self) -> bool {
        self.choices.is_empty()
    }

    /// Finds a choice on this step by id (first match wins).
    pub fn choice(&self, choice_id: &str) -> Option<&SimulationChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// Wire shape of a simulation inside a lecture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationDocument {
    start_step_id: String,
    #[serde(default)]
    steps: Vec<SimulationStep>,
}

/// A branching narrative exercise.
///
/// Read-only once built: engines borrow it and never mutate it, so one
/// value can back any number of concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SimulationDocument", into = "SimulationDocument")]
pub struct Simulation {
    start_step_id: String,
    steps: Vec<SimulationStep>,
    index: HashMap<String, usize>,
}

impl From<SimulationDocument> for Simulation {
    fn from(doc: SimulationDocument) -> Self {
        Simulation::new(doc.start_step_id, doc.steps)
    }
}

impl From<Simulation> for SimulationDocument {
    fn from(sim: Simulation) -> Self {
        SimulationDocument {
            start_step_id: sim.start_step_id,
            steps: sim.steps,
        }
    }
}

impl Simulation {
    /// Builds a simulation and its id index.
    ///
    /// Duplicate step ids are kept in `steps()` but only the first
    /// occurrence is addressable; validation reports the rest.
    pub fn new(start_step_id: impl Into<String>, steps: Vec<SimulationStep>) -> Self {
        let mut index = HashMap::with_capacity(steps.len());
        for (pos, step) in steps.iter().enumerate() {
            index.entry(step.id.clone()).or_insert(pos);
        }

        Self {
            start_step_id: start_step_id.into(),
            steps,
            index,
        }
    }

    /// Decodes a simulation from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::from)
    }

    /// Encodes the simulation in its JSON document form.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::from)
    }

    pub fn start_step_id(&self) -> &str {
        &self.start_step_id
    }

    /// Steps in authored order.
    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }

    /// Resolves a step by id.
    pub fn step(&self, id: &str) -> Option<&SimulationStep> {
        self.index.get(id).map(|&pos| &self.steps[pos])
    }

    /// Returns true if `id` names an existing step.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The step entered on open/restart, if it exists.
    pub fn start_step(&self) -> Option<&SimulationStep> {
        self.step(&self.start_step_id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
