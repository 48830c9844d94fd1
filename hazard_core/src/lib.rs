//! Hazard Core - lecture documents and the branching simulation engine
//!
//! Lectures may carry a "choose your path" simulation: a directed graph of
//! narrative steps linked by choices. This crate holds:
//! 1. **Document model**: lectures, simulations, steps and choices
//! 2. **Engine**: a pure, synchronous state machine (`Step(id) | End`)
//! 3. **Authoring checks**: validation and reachability analysis
//!
//! Nothing here performs I/O; fetching documents is the content store's job.

pub mod analysis;
pub mod engine;
pub mod error;
pub mod lecture;
pub mod simulation;
pub mod validation;

// Re-export key types for convenience
pub use analysis::{explore, PathSummary};
pub use engine::{EngineState, SessionId, SimulationEngine, Transition, View};
pub use error::{DocumentError, EngineError};
pub use lecture::{CategorizationCategory, CategorizationGame, Lecture, QuizQuestion};
pub use simulation::{Simulation, SimulationChoice, SimulationStep};
pub use validation::{validate, Issue, Severity, ValidationReport};
