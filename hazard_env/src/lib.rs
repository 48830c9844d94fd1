//! Hazard Environment Layer - where lecture documents come from
//!
//! This crate provides the content store seam so the simulation engine
//! never performs I/O itself. A store fetches and decodes lecture
//! documents; the loader vets a lecture's simulation and hands a fully
//! resolved `Simulation` to the synchronous engine.
//!
//! # Example
//!
//! ```ignore
//! use hazard_env::{load_simulation, FsContentStore};
//! use hazard_core::SimulationEngine;
//!
//! async fn open(store: &FsContentStore, id: &str) {
//!     if let Some(sim) = load_simulation(store, id).await? {
//!         let engine = SimulationEngine::open(&sim);
//!         // render engine.view() ...
//!     }
//! }
//! ```

mod error;
mod fs_impl;
mod loader;
mod memory_impl;
mod store;

pub use error::StoreError;
pub use fs_impl::FsContentStore;
pub use loader::{decode_lecture, decode_simulation, load_simulation, playable_simulation, vet};
pub use memory_impl::MemoryContentStore;
pub use store::ContentStore;
