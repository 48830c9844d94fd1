//! Resolving where a simulation comes from.

use hazard_core::{Lecture, Simulation};
use hazard_env::{vet, ContentStore, FsContentStore, StoreError};
use std::path::PathBuf;
use tracing::info;

use crate::error::SimError;
use crate::scenarios::DemoId;

/// A simulation source named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A JSON file holding either a bare simulation or a whole lecture
    File(PathBuf),

    /// A lecture inside a store directory
    Store { dir: PathBuf, lecture: String },

    /// A built-in demo
    Demo(DemoId),
}

impl Source {
    /// Builds a source from the positional argument and store flags.
    ///
    /// `demo:<name>` selects a demo; `--store DIR --lecture ID` selects a
    /// stored lecture; anything else is a file path.
    pub fn parse(
        arg: Option<&str>,
        store: Option<PathBuf>,
        lecture: Option<String>,
    ) -> Result<Self, SimError> {
        match (arg, store, lecture) {
            (Some(arg), None, None) => match arg.strip_prefix("demo:") {
                Some(name) => name.parse().map(Source::Demo).map_err(SimError::InvalidInput),
                None => Ok(Source::File(PathBuf::from(arg))),
            },
            (None, Some(dir), Some(lecture)) => Ok(Source::Store { dir, lecture }),
            (None, Some(_), None) => Err(SimError::invalid("--store needs --lecture")),
            (None, None, Some(_)) => Err(SimError::invalid("--lecture needs --store")),
            (None, None, None) => Err(SimError::invalid(
                "name a simulation file, demo:<name>, or --store DIR --lecture ID",
            )),
            (Some(_), _, _) => Err(SimError::invalid(
                "give either a source argument or --store/--lecture, not both",
            )),
        }
    }

    /// Label used in logs and transcripts.
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Store { dir, lecture } => format!("{}#{}", dir.display(), lecture),
            Source::Demo(demo) => format!("demo:{}", demo),
        }
    }

    /// Loads the simulation, applying the same vetting as lecture loading.
    pub async fn load(&self) -> Result<Simulation, SimError> {
        let label = self.label();
        let simulation = vet(&label, self.load_unvetted().await?)
            .ok_or_else(|| SimError::NotPlayable(label.clone()))?;
        info!("Loaded {} ({} steps)", label, simulation.len());
        Ok(simulation)
    }

    /// Loads the simulation as authored, without validation.
    ///
    /// Fails with `NotPlayable` only when there is no simulation at all.
    pub async fn load_unvetted(&self) -> Result<Simulation, SimError> {
        let label = self.label();
        let simulation = match self {
            Source::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| StoreError::io(path, e))?;
                decode_file(&label, &text)?
            }
            Source::Store { dir, lecture } => {
                let store = FsContentStore::new(dir);
                store.fetch_lecture(lecture).await?.and_then(|l| l.simulation)
            }
            Source::Demo(demo) => Some(demo.simulation()),
        };

        simulation.ok_or(SimError::NotPlayable(label))
    }
}

/// Decodes a file that holds either a simulation or a lecture document.
///
/// Simulation documents are recognized by their top-level `startStepId`.
fn decode_file(label: &str, text: &str) -> Result<Option<Simulation>, StoreError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| StoreError::decode(label, e))?;

    if value.get("startStepId").is_some() {
        let simulation: Simulation =
            serde_json::from_value(value).map_err(|e| StoreError::decode(label, e))?;
        Ok(Some(simulation))
    } else {
        let lecture: Lecture =
            serde_json::from_value(value).map_err(|e| StoreError::decode(label, e))?;
        Ok(lecture.simulation)
    }
}
