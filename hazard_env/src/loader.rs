//! Turns stored lectures into simulations the engine may run.
//!
//! A lecture "has no simulation" when the field is absent, has zero steps,
//! or fails authoring validation with an error (missing start step,
//! ambiguous ids). Warnings such as dangling targets are logged and the
//! simulation is still returned.

use hazard_core::{validate, Lecture, Simulation};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::ContentStore;

/// Fetches a lecture and returns its playable simulation, if any.
pub async fn load_simulation<S>(store: &S, lecture_id: &str) -> Result<Option<Simulation>, StoreError>
where
    S: ContentStore + ?Sized,
{
    let Some(lecture) = store.fetch_lecture(lecture_id).await? else {
        debug!("Lecture '{}' not found", lecture_id);
        return Ok(None);
    };
    Ok(playable_simulation(lecture))
}

/// Extracts the simulation from a lecture if it may be handed to the engine.
pub fn playable_simulation(lecture: Lecture) -> Option<Simulation> {
    if !lecture.has_simulation() {
        debug!("Lecture '{}' has no simulation", lecture.id);
        return None;
    }
    let simulation = lecture.simulation?;
    vet(&lecture.id, simulation)
}

/// Runs validation, logging findings; drops the simulation on errors.
pub fn vet(source: &str, simulation: Simulation) -> Option<Simulation> {
    let report = validate(&simulation);

    for issue in report.warnings() {
        debug!("{}: {}", source, issue);
    }

    if !report.is_playable() {
        for issue in report.errors() {
            warn!("{}: {} (simulation disabled)", source, issue);
        }
        return None;
    }

    Some(simulation)
}

/// Decodes a bare simulation document.
pub fn decode_simulation(json: &str) -> Result<Simulation, StoreError> {
    Simulation::from_json(json).map_err(|e| StoreError::decode("simulation", e))
}

/// Decodes a lecture document.
pub fn decode_lecture(json: &str) -> Result<Lecture, StoreError> {
    Lecture::from_json(json).map_err(|e| StoreError::decode("lecture", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_impl::MemoryContentStore;
    use hazard_core::{SimulationChoice, SimulationStep};

    fn drill() -> Simulation {
        Simulation::new(
            "a",
            vec![
                SimulationStep::new(
                    "a",
                    "You feel shaking.",
                    vec![SimulationChoice::to_step("c1", "Hide under a table", "b")],
                ),
                SimulationStep::new("b", "You are safe.", vec![]),
            ],
        )
    }

    #[tokio::test]
    async fn test_load_playable() {
        let store = MemoryContentStore::with_lectures(vec![
            Lecture::new("quake", "Earthquakes").with_simulation(drill()),
        ]);

        let sim = load_simulation(&store, "quake").await.unwrap().unwrap();
        assert_eq!(sim, drill());
    }

    #[tokio::test]
    async fn test_absent_cases_are_none() {
        let store = MemoryContentStore::with_lectures(vec![
            Lecture::new("plain", "No sim"),
            Lecture::new("empty", "Zero steps").with_simulation(Simulation::new("a", vec![])),
            Lecture::new("broken", "Lost start").with_simulation(Simulation::new(
                "deleted",
                vec![SimulationStep::new("a", "x", vec![])],
            )),
        ]);

        assert!(load_simulation(&store, "missing").await.unwrap().is_none());
        assert!(load_simulation(&store, "plain").await.unwrap().is_none());
        assert!(load_simulation(&store, "empty").await.unwrap().is_none());
        assert!(load_simulation(&store, "broken").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dangling_target_still_loads() {
        let sim = Simulation::new(
            "a",
            vec![SimulationStep::new("a", "x", vec![SimulationChoice::to_step("c", "go", "ghost")])],
        );
        let store = MemoryContentStore::with_lectures(vec![
            Lecture::new("l", "Dangling").with_simulation(sim.clone()),
        ]);

        assert_eq!(load_simulation(&store, "l").await.unwrap(), Some(sim));
    }

    #[test]
    fn test_decode_errors_name_the_document() {
        let err = decode_simulation("[]").unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode simulation"));

        let err = decode_lecture("{}").unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
