use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::models::question::Question;

#[derive(Debug, Deserialize)]
struct QuestionsFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// In-memory question catalog, loaded once at startup and read-only after
/// that. File order is preserved: daily selection indexes into it, so
/// reordering mid-day would change which question "today" resolves to.
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read questions file: {}", path.display()))?;
        let file: QuestionsFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse questions file: {}", path.display()))?;

        Ok(Self::from_questions(file.questions))
    }

    /// Entries with a missing or empty answer key are kept (a bad catalog
    /// entry must never take the service down) but flagged here, since they
    /// can never be answered correctly.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        for question in &questions {
            if !question.has_answer_key() {
                tracing::warn!(
                    "Question {} has no usable answer key for its type, it will never validate",
                    question.id
                );
            }
        }

        Self { questions }
    }

    /// All questions in catalog (insertion) order.
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn by_difficulty(&self, difficulty: u8) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> QuestionCatalog {
        let file: QuestionsFile = serde_json::from_value(serde_json::json!({
            "questions": [
                {
                    "id": "q-fountain",
                    "type": "multiple-choice",
                    "prompt": "Which quad has the fountain?",
                    "choices": ["East", "West"],
                    "difficulty": 1,
                    "basePoints": 100,
                    "correctIndex": 1,
                    "tags": ["landmarks"]
                },
                {
                    "id": "q-halls",
                    "type": "select-all",
                    "prompt": "Which of these are residence halls?",
                    "choices": ["Aspen", "Larkin", "Registrar"],
                    "difficulty": 2,
                    "basePoints": 150,
                    "correctIndices": [0, 1],
                    "tags": ["landmarks", "housing"]
                }
            ]
        }))
        .unwrap();
        QuestionCatalog::from_questions(file.questions)
    }

    #[test]
    fn lookups_by_id_tag_and_difficulty() {
        let catalog = catalog();
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.get_by_id("q-halls").unwrap().difficulty, 2);
        assert!(catalog.get_by_id("q-missing").is_none());
        assert_eq!(catalog.by_tag("landmarks").len(), 2);
        assert_eq!(catalog.by_tag("housing").len(), 1);
        assert_eq!(catalog.by_difficulty(1).len(), 1);
    }

    #[test]
    fn preserves_file_order() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.all().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-fountain", "q-halls"]);
    }
}
