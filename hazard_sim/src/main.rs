//! Hazard Simulation CLI
//!
//! Play, replay, explore and inspect lecture simulations from a terminal.

use clap::{Args, Parser, Subcommand};
use hazard_env::{ContentStore, FsContentStore};
use hazard_sim::scenarios::DemoId;
use hazard_sim::{
    lecture_rows, parse_script, terminal, Explorer, InspectReport, ReplayRunner, SimError, Source,
    Transcript,
};
use std::io;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where to load a simulation from.
#[derive(Args, Debug)]
struct SourceArgs {
    /// Simulation or lecture JSON file, or demo:<name>
    source: Option<String>,

    /// Lecture store directory (one <id>.json per lecture)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Lecture id inside --store
    #[arg(long)]
    lecture: Option<String>,
}

impl SourceArgs {
    fn resolve(&self) -> Result<Source, SimError> {
        Source::parse(self.source.as_deref(), self.store.clone(), self.lecture.clone())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a simulation interactively
    Play(SourceArgs),

    /// Apply a comma-separated list of choice ids (r = restart)
    Replay {
        #[command(flatten)]
        source: SourceArgs,

        /// Choice ids to apply in order, e.g. c1,c3,r,c2
        #[arg(short, long)]
        choices: String,
    },

    /// Run seeded random walks over a simulation
    Explore {
        #[command(flatten)]
        source: SourceArgs,

        /// Master seed for determinism (0 = random from time)
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of walks
        #[arg(short, long, default_value = "100")]
        walks: usize,

        /// Choices per walk before giving up (catches loops)
        #[arg(short, long, default_value = "50")]
        max_steps: usize,
    },

    /// Report validation issues and reachability
    Inspect(SourceArgs),

    /// List lectures in a store directory, newest first
    List {
        /// Lecture store directory
        #[arg(long)]
        store: PathBuf,
    },

    /// List built-in demo simulations
    Demos,
}

/// Hazard lecture simulation harness
#[derive(Parser, Debug)]
#[command(name = "hazard-sim")]
#[command(about = "Play and check branching lecture simulations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    json: bool,

    /// Write a JSON transcript (play, replay, explore)
    #[arg(long, global = true)]
    export: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &runtime) {
        error!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, runtime: &Runtime) -> Result<(), SimError> {
    match &cli.command {
        Command::Play(args) => {
            let source = args.resolve()?;
            let sim = runtime.block_on(source.load())?;
            let transcript = terminal::play(&sim, &source.label(), io::stdin().lock(), io::stdout())?;
            export(cli, &transcript)
        }
        Command::Replay { source, choices } => {
            let source = source.resolve()?;
            let sim = runtime.block_on(source.load())?;
            let result = ReplayRunner::new(&sim, source.label()).run(&parse_script(choices))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.transcript)?);
            } else {
                for entry in &result.transcript.entries {
                    let choice = entry.choice_text.as_deref().unwrap_or("");
                    let screen = entry.scenario.as_deref().unwrap_or("(end of path)");
                    println!("{:<8} {:<28} {}", entry.event, choice, screen);
                }
                info!("Final state: {}", result.final_state);
            }
            export(cli, &result.transcript)
        }
        Command::Explore {
            source,
            seed,
            walks,
            max_steps,
        } => {
            let source = source.resolve()?;
            let sim = runtime.block_on(source.load())?;
            let seed = resolve_seed(*seed);
            let explorer = Explorer::new(seed)
                .with_walks(*walks)
                .with_max_steps(*max_steps);

            let mut transcript = Transcript::new(&source.label()).with_seed(seed);
            let report = if cli.export.is_some() {
                explorer.run_recorded(&sim, Some(&mut transcript))
            } else {
                explorer.run(&sim)
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                info!("Explored {} (seed={})", source.label(), seed);
                info!("  walks ended:  {}/{}", report.ended_walks, report.walks);
                info!("  walks capped: {}/{}", report.capped_walks, report.walks);
                info!("  choices made: {}", report.total_choices);
                for (id, count) in &report.visit_counts {
                    info!("  {:<20} {}", id, count);
                }
                for id in &report.unvisited {
                    warn!("  never visited: {}", id);
                }
            }

            if cli.export.is_some() {
                export(cli, &transcript)?;
            }
            Ok(())
        }
        Command::Inspect(args) => {
            let source = args.resolve()?;
            let sim = runtime.block_on(source.load_unvetted())?;
            let report = InspectReport::new(&source.label(), &sim);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
            report.verdict()
        }
        Command::List { store } => {
            let lectures = runtime.block_on(FsContentStore::new(store).list_lectures())?;
            let rows = lecture_rows(&lectures);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{}", row);
                }
            }
            Ok(())
        }
        Command::Demos => {
            for demo in DemoId::all() {
                println!("demo:{:<12} {}", demo.name(), demo.description());
            }
            Ok(())
        }
    }
}

fn export(cli: &Cli, transcript: &Transcript) -> Result<(), SimError> {
    if let Some(path) = &cli.export {
        transcript.write_to_file(path)?;
        info!("Exported {} entries to {}", transcript.len(), path.display());
    }
    Ok(())
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
