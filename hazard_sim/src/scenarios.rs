//! Built-in demo simulations for the harness.

use hazard_core::{Simulation, SimulationChoice, SimulationStep};

/// Demo identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoId {
    /// Earthquake drill with a dead-end safe step and a loop back indoors
    Earthquake,

    /// Flood evacuation with explicit ends and a news-checking loop
    Flood,

    /// Single step whose only choice points back to itself
    Loop,
}

impl DemoId {
    /// Returns a list of all demos.
    pub fn all() -> Vec<DemoId> {
        vec![DemoId::Earthquake, DemoId::Flood, DemoId::Loop]
    }

    /// Returns the demo name.
    pub fn name(&self) -> &'static str {
        match self {
            DemoId::Earthquake => "earthquake",
            DemoId::Flood => "flood",
            DemoId::Loop => "loop",
        }
    }

    /// Returns a description of the demo.
    pub fn description(&self) -> &'static str {
        match self {
            DemoId::Earthquake => "Drop, cover, hold on: hide or run during shaking",
            DemoId::Flood => "Flood warning to high ground, with a stalled-car ending",
            DemoId::Loop => "One step that loops forever until restarted or closed",
        }
    }

    /// Builds the demo simulation.
    pub fn simulation(&self) -> Simulation {
        match self {
            DemoId::Earthquake => earthquake(),
            DemoId::Flood => flood(),
            DemoId::Loop => self_loop(),
        }
    }
}

impl std::fmt::Display for DemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DemoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "earthquake" | "quake" => Ok(DemoId::Earthquake),
            "flood" | "flooding" => Ok(DemoId::Flood),
            "loop" | "self_loop" => Ok(DemoId::Loop),
            _ => Err(format!("Unknown demo: {}", s)),
        }
    }
}

fn earthquake() -> Simulation {
    Simulation::new(
        "a",
        vec![
            SimulationStep::new(
                "a",
                "You feel shaking.",
                vec![
                    SimulationChoice::to_step("c1", "Hide under a table", "b"),
                    SimulationChoice::to_step("c2", "Run outside", "outside"),
                ],
            ),
            SimulationStep::new("b", "You are safe.", vec![]),
            SimulationStep::new(
                "outside",
                "Falling glass from a window narrowly misses you.",
                vec![
                    SimulationChoice::to_step("c3", "Move to an open area", "open"),
                    SimulationChoice::to_step("c4", "Go back inside", "a"),
                ],
            ),
            SimulationStep::new(
                "open",
                "You wait in the open, away from buildings, until the shaking stops.",
                vec![SimulationChoice::to_end("c5", "Finish the drill")],
            ),
        ],
    )
}

fn flood() -> Simulation {
    Simulation::new(
        "warning",
        vec![
            SimulationStep::new(
                "warning",
                "A flood warning is issued for your area.",
                vec![
                    SimulationChoice::to_step("kit", "Pack an emergency kit", "ready"),
                    SimulationChoice::to_step("ignore", "Keep watching TV", "rising"),
                ],
            ),
            SimulationStep::new(
                "ready",
                "Your kit is packed. Water starts flowing down the street.",
                vec![
                    SimulationChoice::to_step("walk", "Walk to higher ground", "high"),
                    SimulationChoice::to_step("drive", "Drive through the water", "stalled"),
                ],
            ),
            SimulationStep::new(
                "rising",
                "Water is entering your home.",
                vec![
                    SimulationChoice::to_step("upstairs", "Go to the upper floor", "high"),
                    SimulationChoice::to_step("news", "Check the news again", "warning"),
                ],
            ),
            SimulationStep::new(
                "stalled",
                "Your car stalls in moving water.",
                vec![SimulationChoice::to_end("rescue", "Call for rescue")],
            ),
            SimulationStep::new(
                "high",
                "You are on high ground and safe.",
                vec![SimulationChoice::to_end("finish", "Finish")],
            ),
        ],
    )
}

fn self_loop() -> Simulation {
    Simulation::new(
        "a",
        vec![SimulationStep::new(
            "a",
            "Aftershocks keep coming.",
            vec![SimulationChoice::to_step("stay", "Stay under cover", "a")],
        )],
    )
}
