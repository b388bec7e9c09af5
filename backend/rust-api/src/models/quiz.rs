use serde::{Deserialize, Serialize};

use crate::models::answer::SubmittedAnswer;
use crate::models::question::SafeQuestion;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizRequest {
    #[serde(default)]
    pub guest_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub guest_token: Option<String>,
    pub question_id: String,
    pub answer: SubmittedAnswer,
    /// Clients may report fractional milliseconds; negative values are
    /// clamped to zero before scoring.
    pub elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub has_quiz: bool,
    pub quiz_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizResponse {
    pub quiz_date: String,
    pub question: SafeQuestion,
    pub already_started: bool,
}

/// Itemized scoring result returned with a correct submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    pub base_points: u32,
    pub attempt_multiplier: f64,
    pub attempt_number: u32,
    pub base_after_multiplier: u32,
    pub first_try_bonus: u32,
    pub speed_bonus: u32,
    pub total_points: u32,
}

/// Success body for a correct submission. Exactly one of the answer-key
/// fields is populated, matching the question type; this is the only place
/// the key is ever sent to a client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCorrectResponse {
    pub correct: bool,
    pub attempt_number: u32,
    pub points_earned: u32,
    pub points_breakdown: PointsBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_indices: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_answers: Option<Vec<String>>,
    pub quiz_date: String,
}

/// Type-appropriate wrong-answer feedback. Never carries the correct answer.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswerFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_indices: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIncorrectResponse {
    pub correct: bool,
    pub attempt_number: u32,
    pub feedback: WrongAnswerFeedback,
    pub quiz_date: String,
}
