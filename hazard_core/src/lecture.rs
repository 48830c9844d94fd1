//! Lecture documents as stored by the content store.
//!
//! Field names follow the stored camelCase shape. Quiz questions and
//! categorization games are carried as plain data so documents round-trip;
//! scoring them happens elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::simulation::Simulation;

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
}

/// One bucket of a categorization game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationCategory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Sort-items-into-buckets game attached to a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationGame {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<CategorizationCategory>,
}

fn default_true() -> bool {
    true
}

/// A lecture document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    /// Document id. Stores may fill this from the document key.
    #[serde(default)]
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_description: Option<String>,

    /// Rich-text body (HTML)
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub category: String,

    /// Unix milliseconds
    #[serde(default)]
    pub created_at_ms: u64,

    /// Unix milliseconds
    #[serde(default)]
    pub updated_at_ms: u64,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "default_true")]
    pub allow_comments: bool,

    #[serde(default)]
    pub views: u64,

    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Simulation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorization_game: Option<CategorizationGame>,

    #[serde(default)]
    pub earthquake_mini_game: bool,
}

impl Lecture {
    /// Creates an unpublished lecture with defaults for everything else.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            card_image_url: None,
            card_description: None,
            content: String::new(),
            author: String::new(),
            category: String::new(),
            created_at_ms: 0,
            updated_at_ms: 0,
            published: false,
            featured: false,
            allow_comments: true,
            views: 0,
            quiz: Vec::new(),
            simulation: None,
            categorization_game: None,
            earthquake_mini_game: false,
        }
    }

    /// Attaches a simulation.
    pub fn with_simulation(mut self, simulation: Simulation) -> Self {
        self.simulation = Some(simulation);
        self
    }

    /// Sets the creation time (Unix ms).
    pub fn with_created_at(mut self, ms: u64) -> Self {
        self.created_at_ms = ms;
        self
    }

    /// True if a simulation with at least one step is attached.
    pub fn has_simulation(&self) -> bool {
        self.simulation.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Decodes a lecture from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::from)
    }

    /// Encodes the lecture as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationStep;

    #[test]
    fn test_decode_with_defaults() {
        let json = r#"{
            "title": "Earthquake Preparedness",
            "content": "<p>Drop, cover, hold on.</p>",
            "author": "Ms. Reyes",
            "category": "earthquake",
            "quiz": [
                {"question": "What do you do first?", "options": ["Run", "Drop"], "correctAnswer": 1}
            ]
        }"#;

        let lecture = Lecture::from_json(json).unwrap();
        assert_eq!(lecture.id, "");
        assert!(!lecture.published);
        assert!(lecture.allow_comments);
        assert_eq!(lecture.views, 0);
        assert_eq!(lecture.quiz[0].correct_answer, 1);
        assert!(!lecture.has_simulation());
    }

    #[test]
    fn test_has_simulation_requires_steps() {
        let empty = Lecture::new("l1", "Floods").with_simulation(Simulation::new("a", vec![]));
        assert!(!empty.has_simulation());

        let real = Lecture::new("l2", "Floods").with_simulation(Simulation::new(
            "a",
            vec![SimulationStep::new("a", "Water rises.", vec![])],
        ));
        assert!(real.has_simulation());
    }

    #[test]
    fn test_encode_uses_stored_field_names() {
        let lecture = Lecture::new("l1", "Floods")
            .with_created_at(1_700_000_000_000)
            .with_simulation(Simulation::new(
                "a",
                vec![SimulationStep::new("a", "Water rises.", vec![])],
            ));

        let json = lecture.to_json_pretty().unwrap();
        assert!(json.contains("\"createdAtMs\": 1700000000000"));
        assert!(json.contains("\"allowComments\": true"));
        assert!(json.contains("\"startStepId\": \"a\""));
        assert!(!json.contains("cardImageUrl"));

        assert_eq!(Lecture::from_json(&json).unwrap(), lecture);
    }

    #[test]
    fn test_categorization_game() {
        let json = r#"{
            "title": "Sorting",
            "categorizationGame": {
                "title": "Safe or unsafe?",
                "categories": [{"id": "safe", "title": "Safe", "items": ["Under a table"]}]
            }
        }"#;

        let lecture = Lecture::from_json(json).unwrap();
        let game = lecture.categorization_game.unwrap();
        assert_eq!(game.categories[0].items, vec!["Under a table"]);
    }
}
