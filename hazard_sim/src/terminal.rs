//! Interactive terminal play.
//!
//! Renders one screen at a time: the scenario with numbered choices, or the
//! end-of-path screen offering Restart and Close. Generic over the reader
//! and writer so sessions can be scripted in tests.

use hazard_core::{Simulation, SimulationEngine, View};
use std::io::{BufRead, Write};

use crate::error::SimError;
use crate::exporter::{Transcript, TranscriptEvent};

/// Parsed user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// 1-based choice number
    Pick(usize),
    Restart,
    Close,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" | "close" => Command::Close,
        "r" | "restart" => Command::Restart,
        other => other.parse().map(Command::Pick).unwrap_or(Command::Unknown),
    }
}

fn render<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    writeln!(out)?;
    if let Some(scenario) = view.scenario() {
        writeln!(out, "{}", scenario)?;
        writeln!(out)?;
    }

    if view.is_terminal() {
        writeln!(out, "You've reached the end of this path.")?;
        writeln!(out, "  r) Restart Simulation")?;
        writeln!(out, "  q) Close")?;
        write!(out, "> ")?;
    } else {
        let choices = view.choices();
        for (i, choice) in choices.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, choice.text)?;
        }
        write!(out, "Choose [1-{}], r to restart, q to close: ", choices.len())?;
    }
    out.flush()
}

/// Plays a simulation until the user closes it or input ends.
pub fn play<R: BufRead, W: Write>(
    simulation: &Simulation,
    source: &str,
    mut input: R,
    mut output: W,
) -> Result<Transcript, SimError> {
    let mut engine = SimulationEngine::open(simulation);
    let mut transcript = Transcript::new(source);
    transcript.record(TranscriptEvent::Open, &engine, None);

    writeln!(output, "Story Simulation")?;
    writeln!(output, "Make choices to navigate the scenario.")?;

    let mut line = String::new();
    loop {
        render(&mut output, &engine.view())?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match parse_command(&line) {
            Command::Close => break,
            Command::Restart => {
                engine.restart();
                transcript.record(TranscriptEvent::Restart, &engine, None);
            }
            Command::Pick(n) => {
                let offered = engine.offered();
                match n.checked_sub(1).and_then(|i| offered.get(i)) {
                    Some(choice) => {
                        engine.choose(&choice.id)?;
                        transcript.record(TranscriptEvent::Choose, &engine, Some(choice));
                    }
                    None => writeln!(output, "No choice {} here.", n)?,
                }
            }
            Command::Unknown => writeln!(output, "Please enter a choice number, r or q.")?,
        }
    }

    transcript.record(TranscriptEvent::Close, &engine, None);
    engine.close();
    Ok(transcript)
}
