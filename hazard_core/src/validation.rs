//! Validation Module - Authoring-time checks for simulations
//! ===========================================================
//!
//! The engine tolerates malformed content: dangling targets and empty
//! choice lists simply end the path. Some problems still make a simulation
//! unusable (no start step, ambiguous ids), and those are caught here
//! before a simulation is handed to the engine.
//!
//! Usage:
//! ```ignore
//! use hazard_core::validation::validate;
//!
//! let report = validate(&simulation);
//! if !report.is_playable() {
//!     // treat the lecture as having no simulation
//! }
//! for issue in report.warnings() {
//!     println!("warning: {}", issue);
//! }
//! ```

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::analysis;
use crate::simulation::Simulation;

// =============================================================================
// ISSUES
// =============================================================================

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Playable; the engine degrades gracefully
    Warning,
    /// Not playable; loaders treat the simulation as absent
    Error,
}

/// A single authoring problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("simulation has no steps")]
    EmptySimulation,

    #[error("start step '{0}' does not exist")]
    MissingStartStep(String),

    #[error("step id '{0}' is used more than once")]
    DuplicateStepId(String),

    #[error("step '{step_id}' has more than one choice with id '{choice_id}'")]
    DuplicateChoiceId { step_id: String, choice_id: String },

    #[error("choice '{choice_id}' on step '{step_id}' targets unknown step '{target}'")]
    DanglingChoiceTarget {
        step_id: String,
        choice_id: String,
        target: String,
    },

    #[error("step '{0}' is not reachable from the start step")]
    UnreachableStep(String),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::EmptySimulation
            | Issue::MissingStartStep(_)
            | Issue::DuplicateStepId(_)
            | Issue::DuplicateChoiceId { .. } => Severity::Error,
            Issue::DanglingChoiceTarget { .. } | Issue::UnreachableStep(_) => Severity::Warning,
        }
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// All issues found in one simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// True if nothing blocks handing the simulation to the engine.
    pub fn is_playable(&self) -> bool {
        self.errors().next().is_none()
    }

    /// True if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Checks a simulation for authoring problems.
pub fn validate(simulation: &Simulation) -> ValidationReport {
    let mut report = ValidationReport::default();

    if simulation.is_empty() {
        report.issues.push(Issue::EmptySimulation);
        return report;
    }

    let start_exists = simulation.contains(simulation.start_step_id());
    if !start_exists {
        report
            .issues
            .push(Issue::MissingStartStep(simulation.start_step_id().to_string()));
    }

    let mut step_ids: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for step in simulation.steps() {
        if !step_ids.insert(&step.id) && reported.insert(&step.id) {
            report.issues.push(Issue::DuplicateStepId(step.id.clone()));
        }
    }

    for step in simulation.steps() {
        let mut choice_ids: HashSet<&str> = HashSet::new();
        for choice in &step.choices {
            if !choice_ids.insert(&choice.id) {
                report.issues.push(Issue::DuplicateChoiceId {
                    step_id: step.id.clone(),
                    choice_id: choice.id.clone(),
                });
            }

            if let Some(target) = choice.next_step_id.as_deref() {
                if !simulation.contains(target) {
                    report.issues.push(Issue::DanglingChoiceTarget {
                        step_id: step.id.clone(),
                        choice_id: choice.id.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }

    if start_exists {
        let summary = analysis::explore(simulation);
        let mut checked: HashSet<&str> = HashSet::new();
        for step in simulation.steps() {
            if checked.insert(&step.id) && !summary.is_reachable(&step.id) {
                report.issues.push(Issue::UnreachableStep(step.id.clone()));
            }
        }
    }

    report
}
