//! Hazard Simulation Harness
//!
//! A terminal stand-in for the lecture dialog that runs branching
//! simulations, plus deterministic tooling around it:
//! - **Play**: interactive, one screen at a time
//! - **Replay**: a fixed script of choice ids, for regression checks
//! - **Explore**: seeded random walks; any run is reproducible by its seed
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   load    ┌───────────────┐  &Simulation  ┌──────────────────┐
//! │ Source       │──────────►│ hazard_env    │──────────────►│ SimulationEngine │
//! │ file / store │           │ store + vet   │               │ Step(id) | End   │
//! │ / demo       │           └───────────────┘               └────────┬─────────┘
//! └──────────────┘                                                    │
//!                                   ┌───────────────┬─────────────────┤
//!                                   ▼               ▼                 ▼
//!                              terminal::play  ReplayRunner       Explorer
//!                                   └───────────────┴───────► Transcript (JSON)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hazard_sim::{Explorer, scenarios::DemoId};
//!
//! let sim = DemoId::Flood.simulation();
//! let report = Explorer::new(42).with_walks(200).run(&sim);
//! println!("{} walks ended, {} looped", report.ended_walks, report.capped_walks);
//! ```

mod error;
mod explorer;
mod exporter;
mod report;
mod runner;
mod source;
pub mod scenarios;
pub mod terminal;

pub use error::SimError;
pub use explorer::{ExploreReport, Explorer};
pub use exporter::{Transcript, TranscriptEntry, TranscriptEvent};
pub use report::{lecture_rows, InspectReport, IssueRow, LectureRow};
pub use runner::{parse_script, ReplayResult, ReplayRunner, ScriptItem};
pub use source::Source;
