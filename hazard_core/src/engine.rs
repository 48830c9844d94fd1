//! The simulation engine: a tiny state machine over a [`Simulation`] graph.
//!
//! # States
//!
//! ```text
//!   open/restart ──► Step(start) ──choose(c)──► Step(c.next)   (c.next exists)
//!                        │
//!                        └──────choose(c)──────► End           (sentinel / dangling)
//!
//!   End ──restart──► Step(start)
//! ```
//!
//! A step with no choices is rendered through the same terminal path as
//! `End`: the presentation layer only offers Restart or Close.
//!
//! The engine owns its state; nothing is global and nothing is persisted.
//! Closing (dropping) the engine discards where the user was.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::simulation::{Simulation, SimulationChoice};

/// Identifier of one engine instance (one open dialog).
///
/// Fresh per `open`, used only to tell concurrent runs apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 8 chars are enough to correlate log lines
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Where the engine currently is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "stepId", rename_all = "snake_case")]
pub enum EngineState {
    /// Displaying the step with this id
    Step(String),

    /// Implicit terminal state (no scenario, no choices)
    End,
}

impl EngineState {
    /// Returns the current step id, if any.
    pub fn step_id(&self) -> Option<&str> {
        match self {
            EngineState::Step(id) => Some(id),
            EngineState::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, EngineState::End)
    }
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineState::Step(id) => write!(f, "step '{}'", id),
            EngineState::End => write!(f, "end"),
        }
    }
}

/// The state entered on open/restart.
///
/// Loaders reject simulations whose start step is missing; if one slips
/// through anyway the engine shows the terminal view instead of failing.
pub fn entry_state(simulation: &Simulation) -> EngineState {
    let start = simulation.start_step_id();
    if simulation.contains(start) {
        EngineState::Step(start.to_string())
    } else {
        warn!("Start step '{}' does not exist, opening at end", start);
        EngineState::End
    }
}

/// Pure transition over a choice: its target if that step exists, else End.
pub fn transition(simulation: &Simulation, choice: &SimulationChoice) -> EngineState {
    match choice.next_step_id.as_deref() {
        Some(next) if simulation.contains(next) => EngineState::Step(next.to_string()),
        _ => EngineState::End,
    }
}

/// Record of one applied choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub choice_id: String,
    pub from: EngineState,
    pub to: EngineState,
}

/// What the presentation layer should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A live step with at least one choice
    Active {
        step_id: &'a str,
        scenario: &'a str,
        choices: &'a [SimulationChoice],
    },

    /// End of the path: only Restart or Close are available.
    ///
    /// Carries the scenario of a dead-end step so its text can still be
    /// shown; `None` for the explicit End state.
    Terminal { scenario: Option<&'a str> },
}

impl<'a> View<'a> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, View::Terminal { .. })
    }

    /// Narrative text to display, if any.
    pub fn scenario(&self) -> Option<&'a str> {
        match *self {
            View::Active { scenario, .. } => Some(scenario),
            View::Terminal { scenario } => scenario,
        }
    }

    /// Choices to display (empty when terminal).
    pub fn choices(&self) -> &'a [SimulationChoice] {
        match *self {
            View::Active { choices, .. } => choices,
            View::Terminal { .. } => &[],
        }
    }
}

/// One run of a simulation.
///
/// Borrows the simulation read-only; open as many engines over the same
/// value as needed.
#[derive(Debug)]
pub struct SimulationEngine<'a> {
    simulation: &'a Simulation,
    state: EngineState,
    session: SessionId,
    steps_taken: usize,
}

impl<'a> SimulationEngine<'a> {
    /// Opens the simulation at its start step.
    pub fn open(simulation: &'a Simulation) -> Self {
        let session = SessionId::new();
        let state = entry_state(simulation);
        debug!("[{}] Opened simulation at {}", session, state);

        Self {
            simulation,
            state,
            session,
            steps_taken: 0,
        }
    }

    /// Enters the start step. Identical to [`restart`](Self::restart).
    pub fn start(&mut self) {
        self.restart();
    }

    /// Returns to the start step from any state, including End.
    pub fn restart(&mut self) {
        self.state = entry_state(self.simulation);
        self.steps_taken = 0;
        debug!("[{}] Restarted at {}", self.session, self.state);
    }

    /// Applies the choice with `choice_id` offered by the current step.
    ///
    /// Fails only if that id is not on screen (End, dead-end step, or a
    /// choice from another step); the state is left unchanged then.
    pub fn choose(&mut self, choice_id: &str) -> Result<Transition, EngineError> {
        let choice = self
            .offered()
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| EngineError::not_offered(choice_id, &self.state))?;

        let to = transition(self.simulation, choice);
        if to.is_end() {
            if let Some(target) = choice.next_step_id.as_deref() {
                debug!(
                    "[{}] Choice '{}' targets unknown step '{}', ending path",
                    self.session, choice_id, target
                );
            }
        }

        let from = std::mem::replace(&mut self.state, to.clone());
        self.steps_taken += 1;
        debug!("[{}] {} --{}--> {}", self.session, from, choice_id, to);

        Ok(Transition {
            choice_id: choice_id.to_string(),
            from,
            to,
        })
    }

    /// Applies a choice value belonging to the current step.
    pub fn choose_choice(&mut self, choice: &SimulationChoice) -> Result<Transition, EngineError> {
        self.choose(&choice.id)
    }

    /// Discards the run.
    pub fn close(self) {
        debug!("[{}] Closed at {}", self.session, self.state);
    }

    /// The current render.
    pub fn view(&self) -> View<'a> {
        let step = match &self.state {
            EngineState::Step(id) => self.simulation.step(id),
            EngineState::End => None,
        };

        match step {
            Some(step) if !step.is_dead_end() => View::Active {
                step_id: &step.id,
                scenario: &step.scenario,
                choices: &step.choices,
            },
            Some(step) => View::Terminal {
                scenario: Some(&step.scenario),
            },
            None => View::Terminal { scenario: None },
        }
    }

    /// Choices currently on screen.
    pub fn offered(&self) -> &'a [SimulationChoice] {
        self.view().choices()
    }

    pub fn is_terminal(&self) -> bool {
        self.view().is_terminal()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn simulation(&self) -> &'a Simulation {
        self.simulation
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Choices applied since the last open/restart.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationStep;
    use proptest::prelude::*;

    fn shaking() -> Simulation {
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

    fn self_loop() -> Simulation {
        Simulation::new(
            "a",
            vec![SimulationStep::new(
                "a",
                "The ground keeps shaking.",
                vec![SimulationChoice::to_step("again", "Stay put", "a")],
            )],
        )
    }

    #[test]
    fn test_shaking_scenario() {
        let sim = shaking();
        let mut engine = SimulationEngine::open(&sim);

        match engine.view() {
            View::Active { step_id, scenario, choices } => {
                assert_eq!(step_id, "a");
                assert_eq!(scenario, "You feel shaking.");
                assert_eq!(choices.len(), 1);
                assert_eq!(choices[0].text, "Hide under a table");
            }
            other => panic!("expected active view, got {:?}", other),
        }

        let t = engine.choose("c1").unwrap();
        assert_eq!(t.from, EngineState::Step("a".into()));
        assert_eq!(t.to, EngineState::Step("b".into()));

        // Dead-end step renders like End but keeps its text
        assert_eq!(engine.state(), &EngineState::Step("b".into()));
        assert_eq!(
            engine.view(),
            View::Terminal { scenario: Some("You are safe.") }
        );
        assert!(engine.offered().is_empty());

        engine.restart();
        assert_eq!(engine.state(), &EngineState::Step("a".into()));
        assert_eq!(engine.steps_taken(), 0);
    }

    #[test]
    fn test_null_sentinel_ends_and_restarts() {
        let sim = Simulation::new(
            "a",
            vec![
                SimulationStep::new(
                    "a",
                    "Sirens sound.",
                    vec![
                        SimulationChoice::to_step("go", "Evacuate", "b"),
                        SimulationChoice::to_end("stop", "Ignore it"),
                    ],
                ),
                SimulationStep::new(
                    "b",
                    "You reach high ground.",
                    vec![SimulationChoice::to_end("done", "Finish")],
                ),
            ],
        );
        let mut engine = SimulationEngine::open(&sim);

        engine.choose("go").unwrap();
        let t = engine.choose("done").unwrap();
        assert_eq!(t.to, EngineState::End);
        assert_eq!(engine.view(), View::Terminal { scenario: None });

        engine.restart();
        assert_eq!(engine.state(), &EngineState::Step("a".into()));

        engine.choose("stop").unwrap();
        assert!(engine.state().is_end());
    }

    #[test]
    fn test_dangling_target_is_end() {
        let sim = Simulation::new(
            "a",
            vec![SimulationStep::new(
                "a",
                "Smoke fills the hallway.",
                vec![SimulationChoice::to_step("c", "Open the door", "deleted-step")],
            )],
        );
        let mut engine = SimulationEngine::open(&sim);

        let t = engine.choose("c").unwrap();
        assert_eq!(t.to, EngineState::End);
        assert!(engine.is_terminal());
    }

    #[test]
    fn test_choice_not_offered_leaves_state() {
        let sim = shaking();
        let mut engine = SimulationEngine::open(&sim);

        let err = engine.choose("nope").unwrap_err();
        assert_eq!(err, EngineError::not_offered("nope", "step 'a'"));
        assert_eq!(engine.state(), &EngineState::Step("a".into()));

        engine.choose("c1").unwrap();
        // c1 belongs to step a, not to the dead-end step b
        assert!(engine.choose("c1").is_err());
        assert_eq!(engine.steps_taken(), 1);
    }

    #[test]
    fn test_end_accepts_only_restart() {
        let sim = Simulation::new(
            "a",
            vec![SimulationStep::new("a", "x", vec![SimulationChoice::to_end("e", "End")])],
        );
        let mut engine = SimulationEngine::open(&sim);
        engine.choose("e").unwrap();

        assert!(engine.choose("e").is_err());
        assert!(engine.state().is_end());

        engine.start();
        assert_eq!(engine.state(), &EngineState::Step("a".into()));
    }

    #[test]
    fn test_self_loop_never_terminates() {
        let sim = self_loop();
        let mut engine = SimulationEngine::open(&sim);

        for _ in 0..1000 {
            let t = engine.choose("again").unwrap();
            assert_eq!(t.to, EngineState::Step("a".into()));
        }
        assert!(!engine.is_terminal());
        assert_eq!(engine.steps_taken(), 1000);
    }

    #[test]
    fn test_missing_start_opens_terminal() {
        let sim = Simulation::new("gone", vec![SimulationStep::new("a", "x", vec![])]);
        let engine = SimulationEngine::open(&sim);

        assert!(engine.state().is_end());
        assert_eq!(engine.view(), View::Terminal { scenario: None });
    }

    #[test]
    fn test_engines_share_simulation() {
        let sim = shaking();
        let mut first = SimulationEngine::open(&sim);
        let second = SimulationEngine::open(&sim);

        first.choose("c1").unwrap();

        assert_ne!(first.session(), second.session());
        assert_eq!(second.state(), &EngineState::Step("a".into()));
        first.close();
        assert_eq!(second.steps_taken(), 0);
    }

    #[test]
    fn test_state_serializes_tagged() {
        let json = serde_json::to_string(&EngineState::Step("a".into())).unwrap();
        assert_eq!(json, r#"{"state":"step","stepId":"a"}"#);
        let json = serde_json::to_string(&EngineState::End).unwrap();
        assert_eq!(json, r#"{"state":"end"}"#);
    }

    /// Generates small graphs whose targets mix real ids, dangling ids and
    /// the end sentinel.
    fn arb_simulation() -> impl Strategy<Value = Simulation> {
        (1usize..6).prop_flat_map(|n| {
            let target = prop_oneof![
                (0..n).prop_map(|i| Some(format!("s{}", i))),
                Just(Some("missing".to_string())),
                Just(None),
            ];
            let choices = prop::collection::vec(target, 0..4);
            (prop::collection::vec(choices, n), 0..n).prop_map(|(all, start)| {
                let steps = all
                    .into_iter()
                    .enumerate()
                    .map(|(i, targets)| {
                        let choices = targets
                            .into_iter()
                            .enumerate()
                            .map(|(j, next)| SimulationChoice {
                                id: format!("c{}", j),
                                text: format!("choice {}", j),
                                next_step_id: next,
                            })
                            .collect();
                        SimulationStep::new(format!("s{}", i), format!("scenario {}", i), choices)
                    })
                    .collect();
                Simulation::new(format!("s{}", start), steps)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_choose_follows_existing_target_or_ends(
            sim in arb_simulation(),
            picks in prop::collection::vec(0usize..4, 0..20),
        ) {
            let mut engine = SimulationEngine::open(&sim);
            for pick in picks {
                let offered = engine.offered();
                if offered.is_empty() {
                    engine.restart();
                    continue;
                }
                let choice = offered[pick % offered.len()].clone();
                let t = engine.choose(&choice.id).unwrap();
                match choice.next_step_id.as_deref() {
                    Some(next) if sim.contains(next) => {
                        prop_assert_eq!(t.to, EngineState::Step(next.to_string()));
                    }
                    _ => prop_assert_eq!(t.to, EngineState::End),
                }
                prop_assert_eq!(engine.state(), &transition(&sim, &choice));
            }
        }

        #[test]
        fn prop_restart_returns_to_start_and_is_idempotent(
            sim in arb_simulation(),
            picks in prop::collection::vec(0usize..4, 0..20),
        ) {
            let mut engine = SimulationEngine::open(&sim);
            for pick in picks {
                let offered = engine.offered();
                if offered.is_empty() {
                    break;
                }
                let id = offered[pick % offered.len()].id.clone();
                engine.choose(&id).unwrap();
            }

            engine.restart();
            let once = engine.state().clone();
            engine.restart();

            prop_assert_eq!(&once, &EngineState::Step(sim.start_step_id().to_string()));
            prop_assert_eq!(engine.state(), &once);
        }
    }
}
