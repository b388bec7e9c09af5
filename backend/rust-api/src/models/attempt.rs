use serde::{Deserialize, Serialize};

/// Per-identity, per-day quiz progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub question_id: String,
    pub attempt_count: u32,
    pub solved: bool,
    pub solved_on_attempt: Option<u32>,
    pub elapsed_ms: Option<u64>,
}

/// Partial update merged into an [`AttemptRecord`]. `None` fields are left
/// untouched; a record is created on first merge if none exists.
#[derive(Debug, Clone, Default)]
pub struct AttemptPatch {
    pub question_id: Option<String>,
    pub attempt_count: Option<u32>,
    pub solved: Option<bool>,
    pub solved_on_attempt: Option<u32>,
    pub elapsed_ms: Option<u64>,
}

impl AttemptRecord {
    pub fn apply(&mut self, patch: AttemptPatch) {
        if let Some(question_id) = patch.question_id {
            self.question_id = question_id;
        }
        if let Some(attempt_count) = patch.attempt_count {
            self.attempt_count = attempt_count;
        }
        if let Some(solved) = patch.solved {
            self.solved = solved;
        }
        if let Some(solved_on_attempt) = patch.solved_on_attempt {
            self.solved_on_attempt = Some(solved_on_attempt);
        }
        if let Some(elapsed_ms) = patch.elapsed_ms {
            self.elapsed_ms = Some(elapsed_ms);
        }
    }
}
