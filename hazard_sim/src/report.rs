//! Summaries printed by the `list` and `inspect` commands.

use hazard_core::{explore, validate, Lecture, PathSummary, Severity, Simulation};
use hazard_env::playable_simulation;
use serde::Serialize;
use std::fmt;

use crate::error::SimError;

/// One lecture in a store listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub published: bool,
    pub created_at_ms: u64,

    /// The lecture opens a playable simulation
    pub simulation: bool,
}

impl LectureRow {
    pub fn from_lecture(lecture: &Lecture) -> Self {
        Self {
            id: lecture.id.clone(),
            title: lecture.title.clone(),
            category: lecture.category.clone(),
            published: lecture.published,
            created_at_ms: lecture.created_at_ms,
            simulation: playable_simulation(lecture.clone()).is_some(),
        }
    }
}

impl fmt::Display for LectureRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.simulation { "[simulation]" } else { "" };
        write!(f, "{:<24} {:<40} {}", self.id, self.title, marker)
    }
}

/// Builds listing rows, keeping the store's order.
pub fn lecture_rows(lectures: &[Lecture]) -> Vec<LectureRow> {
    lectures.iter().map(LectureRow::from_lecture).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueRow {
    pub severity: Severity,
    pub message: String,
}

/// Validation and reachability for one simulation as authored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub source: String,
    pub steps: usize,
    pub start_step_id: String,
    pub playable: bool,
    pub issues: Vec<IssueRow>,
    pub reachability: PathSummary,
}

impl InspectReport {
    pub fn new(source: &str, simulation: &Simulation) -> Self {
        let report = validate(simulation);
        Self {
            source: source.to_string(),
            steps: simulation.len(),
            start_step_id: simulation.start_step_id().to_string(),
            playable: report.is_playable(),
            issues: report
                .issues
                .iter()
                .map(|i| IssueRow {
                    severity: i.severity(),
                    message: i.to_string(),
                })
                .collect(),
            reachability: explore(simulation),
        }
    }

    /// `Err(NotPlayable)` when any issue is an error.
    pub fn verdict(&self) -> Result<(), SimError> {
        if self.playable {
            Ok(())
        } else {
            Err(SimError::NotPlayable(self.source.clone()))
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        let summary = &self.reachability;

        writeln!(f, "{}: {} steps, start '{}'", self.source, self.steps, self.start_step_id)?;
        for issue in &self.issues {
            let tag = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(f, "  {}: {}", tag, issue.message)?;
        }
        writeln!(f, "  reachable: {}", summary.reachable.join(", "))?;
        writeln!(f, "  dead ends: {}", summary.dead_ends.join(", "))?;
        writeln!(f, "  end choices: {}", summary.end_choices)?;
        writeln!(f, "  loops: {}", yes_no(summary.has_cycle))?;
        write!(f, "  playable: {}", yes_no(self.playable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::DemoId;
    use crate::source::Source;
    use hazard_core::SimulationStep;
    use hazard_env::{ContentStore, FsContentStore};

    fn store_with_broken_lecture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let broken = Lecture::new("broken", "Broken")
            .with_created_at(20)
            .with_simulation(Simulation::new(
                "gone",
                vec![SimulationStep::new("a", "Nobody starts here.", vec![])],
            ));
        let good = Lecture::new("quake", "Earthquakes")
            .with_created_at(10)
            .with_simulation(DemoId::Earthquake.simulation());
        let plain = Lecture::new("notes", "Just reading").with_created_at(5);
        for lecture in [broken, good, plain] {
            let path = dir.path().join(format!("{}.json", lecture.id));
            std::fs::write(path, lecture.to_json_pretty().unwrap()).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_rows_mark_only_playable_simulations() {
        let dir = store_with_broken_lecture();
        let lectures = FsContentStore::new(dir.path()).list_lectures().await.unwrap();

        let rows = lecture_rows(&lectures);
        let marked: Vec<(&str, bool)> = rows.iter().map(|r| (r.id.as_str(), r.simulation)).collect();

        assert_eq!(marked, vec![("broken", false), ("quake", true), ("notes", false)]);
        assert!(rows[1].to_string().ends_with("[simulation]"));
        assert!(!rows[0].to_string().contains("[simulation]"));

        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json["createdAtMs"], 10);
        assert_eq!(json["simulation"], true);
    }

    #[tokio::test]
    async fn test_inspect_fails_on_missing_start() {
        let dir = store_with_broken_lecture();
        let source = Source::Store {
            dir: dir.path().to_path_buf(),
            lecture: "broken".into(),
        };
        let sim = source.load_unvetted().await.unwrap();

        let report = InspectReport::new(&source.label(), &sim);

        assert!(!report.playable);
        assert!(report.issues.iter().any(|i| i.severity == Severity::Error));
        assert!(matches!(report.verdict(), Err(SimError::NotPlayable(_))));
        assert!(report.to_string().contains("playable: no"));
    }

    #[test]
    fn test_inspect_passes_demo() {
        let sim = DemoId::Earthquake.simulation();
        let report = InspectReport::new("demo:earthquake", &sim);

        assert!(report.verdict().is_ok());
        assert!(report.issues.is_empty());
        assert!(report.reachability.is_reachable("open"));
        assert!(report.to_string().contains("dead ends: b"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["startStepId"], "a");
        assert_eq!(json["playable"], true);
    }
}
