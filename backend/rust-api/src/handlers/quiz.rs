use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::extractors::AppJson;
use crate::middlewares::auth::AuthContext;
use crate::models::quiz::{
    StartQuizRequest, StartQuizResponse, SubmitCorrectResponse, SubmitIncorrectResponse,
    SubmitQuizRequest, TodayResponse, WrongAnswerFeedback,
};
use crate::services::quiz_service::{QuizService, StartOutcome, SubmitOutcome, TodayOutcome};
use crate::services::session_service::QuizIdentity;
use crate::services::AppState;

#[derive(Debug, Error)]
pub enum QuizApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl QuizApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        QuizApiError::BadRequest(message.into())
    }
}

impl IntoResponse for QuizApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            QuizApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            QuizApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn quiz_service(state: &AppState) -> QuizService {
    QuizService::new(
        state.catalog.clone(),
        state.attempts.clone(),
        state.config.quiz_offset(),
    )
}

/// The session identity wins over a body-supplied guest token; a request
/// carrying neither cannot play.
fn resolve_identity(
    auth: &AuthContext,
    guest_token: Option<&str>,
) -> Result<QuizIdentity, QuizApiError> {
    if let Some(claims) = &auth.0 {
        return Ok(QuizIdentity::User(claims.sub.clone()));
    }

    match guest_token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(QuizIdentity::Guest(token.to_string())),
        _ => Err(QuizApiError::bad_request(
            "guestToken is required for guest sessions",
        )),
    }
}

fn no_quiz_today(quiz_date: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "No quiz available today",
            "quizDate": quiz_date,
        })),
    )
        .into_response()
}

pub async fn get_today(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match quiz_service(&state).today().await {
        TodayOutcome::Available {
            quiz_date,
            question_id,
        } => Json(TodayResponse {
            has_quiz: true,
            quiz_date,
            question_id: Some(question_id),
            message: None,
        }),
        TodayOutcome::NoQuiz { quiz_date } => Json(TodayResponse {
            has_quiz: false,
            quiz_date,
            question_id: None,
            message: Some("No questions available".to_string()),
        }),
    }
}

pub async fn start_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    AppJson(req): AppJson<StartQuizRequest>,
) -> Result<Response, QuizApiError> {
    let identity = resolve_identity(&auth, req.guest_token.as_deref())?;

    let response = match quiz_service(&state).start(&identity).await {
        StartOutcome::NoQuiz { quiz_date } => no_quiz_today(&quiz_date),
        StartOutcome::AlreadyCompleted { quiz_date } => Json(json!({
            "alreadyCompleted": true,
            "quizDate": quiz_date,
            "message": "You already completed today's quiz.",
        }))
        .into_response(),
        StartOutcome::Started {
            quiz_date,
            question,
            already_started,
        } => Json(StartQuizResponse {
            quiz_date,
            question,
            already_started,
        })
        .into_response(),
    };

    Ok(response)
}

pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    AppJson(req): AppJson<SubmitQuizRequest>,
) -> Result<Response, QuizApiError> {
    let identity = resolve_identity(&auth, req.guest_token.as_deref())?;

    if req.question_id.is_empty() {
        return Err(QuizApiError::bad_request("questionId is required"));
    }
    let elapsed_ms = req.elapsed_ms.max(0.0) as u64;

    let outcome = quiz_service(&state)
        .submit(&identity, &req.question_id, &req.answer, elapsed_ms)
        .await;

    let response = match outcome {
        SubmitOutcome::NoQuiz { quiz_date } => no_quiz_today(&quiz_date),
        SubmitOutcome::Rollover {
            quiz_date,
            new_question,
        } => Json(json!({
            "error": "Question has rolled over",
            "rollover": true,
            "quizDate": quiz_date,
            "newQuestion": new_question,
        }))
        .into_response(),
        SubmitOutcome::AlreadyCompleted { quiz_date } => Json(json!({
            "alreadyCompleted": true,
            "quizDate": quiz_date,
            "canRetry": false,
            "message": "You already completed today's quiz.",
        }))
        .into_response(),
        SubmitOutcome::Incorrect {
            quiz_date,
            attempt_number,
            check,
        } => Json(SubmitIncorrectResponse {
            correct: false,
            attempt_number,
            feedback: WrongAnswerFeedback {
                wrong_index: check.selected_index,
                selected_indices: check.selected_indices,
            },
            quiz_date,
        })
        .into_response(),
        SubmitOutcome::Correct {
            quiz_date,
            attempt_number,
            breakdown,
            question,
        } => Json(SubmitCorrectResponse {
            correct: true,
            attempt_number,
            points_earned: breakdown.total_points,
            points_breakdown: breakdown,
            explanation: question.explanation,
            correct_index: question.correct_index,
            correct_indices: question.correct_indices,
            accepted_answers: question.accepted_answers,
            quiz_date,
        })
        .into_response(),
    };

    Ok(response)
}
