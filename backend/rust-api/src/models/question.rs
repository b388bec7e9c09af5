use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "select-all")]
    SelectAll,
    #[serde(rename = "free-text")]
    FreeText,
}

/// Catalog entry. Exactly one of the three answer-key fields is expected to
/// be populated, matching `question_type`; entries that break that invariant
/// are still served but can never be answered correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub difficulty: u8,
    pub base_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_indices: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Question {
    /// Whether the answer key required by `question_type` is present and
    /// non-empty.
    pub fn has_answer_key(&self) -> bool {
        match self.question_type {
            QuestionType::MultipleChoice => self.correct_index.is_some(),
            QuestionType::SelectAll => self
                .correct_indices
                .as_ref()
                .is_some_and(|indices| !indices.is_empty()),
            QuestionType::FreeText => self
                .accepted_answers
                .as_ref()
                .is_some_and(|answers| !answers.is_empty()),
        }
    }

    /// Client-safe view of this question, without any answer-key fields.
    pub fn redacted(&self) -> SafeQuestion {
        SafeQuestion {
            id: self.id.clone(),
            question_type: self.question_type,
            prompt: self.prompt.clone(),
            choices: self.choices.clone(),
            difficulty: self.difficulty,
            base_points: self.base_points,
            tags: self.tags.clone(),
        }
    }
}

/// What clients see before solving. A separate type (rather than a filtered
/// `Question`) so the answer-key fields cannot leak through serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub difficulty: u8,
    pub base_points: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
