#![allow(dead_code)] // each test binary uses a different slice of these helpers

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use campusquiz_api::config::Config;
use campusquiz_api::middlewares::auth::{JwtClaims, JwtService};
use campusquiz_api::models::question::{Question, QuestionType};
use campusquiz_api::services::catalog_service::QuestionCatalog;
use campusquiz_api::{create_router, AppState};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        questions_path: "data/questions.json".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        quiz_utc_offset_hours: -7,
    }
}

/// One question of each type, with answer keys the tests know.
pub fn test_questions() -> Vec<Question> {
    serde_json::from_value(json!([
        {
            "id": "q-clock-tower",
            "type": "multiple-choice",
            "prompt": "Which building's clock tower is visible from the main quad?",
            "choices": ["Harrington Hall", "The Old Library", "Science Annex", "Student Union"],
            "difficulty": 1,
            "basePoints": 100,
            "correctIndex": 1,
            "explanation": "The Old Library's clock tower has anchored the main quad since 1924.",
            "tags": ["landmarks"]
        },
        {
            "id": "q-residence-halls",
            "type": "select-all",
            "prompt": "Select every residence hall on the north campus loop.",
            "choices": ["Aspen Hall", "Birchwood Hall", "Registrar's Office", "Cedar Court"],
            "difficulty": 2,
            "basePoints": 150,
            "correctIndices": [0, 1, 3],
            "tags": ["housing"]
        },
        {
            "id": "q-founding-year",
            "type": "free-text",
            "prompt": "In what year was the campus founded?",
            "difficulty": 2,
            "basePoints": 120,
            "acceptedAnswers": ["1891", "eighteen ninety-one"],
            "explanation": "The charter was signed in the fall of 1891.",
            "tags": ["history"]
        }
    ]))
    .expect("test questions deserialize")
}

pub fn create_test_app() -> Router {
    create_test_app_with_questions(test_questions())
}

pub fn create_test_app_with_questions(questions: Vec<Question>) -> Router {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let catalog = QuestionCatalog::from_questions(questions);
    create_router(Arc::new(AppState::new(test_config(), catalog)))
}

pub fn bearer_for(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let token = JwtService::new(TEST_JWT_SECRET)
        .generate_token(JwtClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + 3600,
        })
        .expect("sign test token");
    format!("Bearer {}", token)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    split_response(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_json_with_auth(app, uri, body, None).await
}

pub async fn post_json_with_auth(
    app: &Router,
    uri: &str,
    body: Value,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(bearer) = bearer {
        builder = builder.header("authorization", bearer);
    }

    let response = app
        .clone()
        .oneshot(
            builder
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    split_response(response).await
}

async fn split_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn question_by_id<'a>(questions: &'a [Question], id: &str) -> &'a Question {
    questions
        .iter()
        .find(|q| q.id == id)
        .unwrap_or_else(|| panic!("unknown test question {}", id))
}

/// An answer the checker must accept for this question.
pub fn correct_answer(question: &Question) -> Value {
    match question.question_type {
        QuestionType::MultipleChoice => json!(question.correct_index.unwrap()),
        QuestionType::SelectAll => json!(question.correct_indices.clone().unwrap()),
        QuestionType::FreeText => json!(question.accepted_answers.as_ref().unwrap()[0]),
    }
}

/// An answer the checker must reject for this question.
pub fn wrong_answer(question: &Question) -> Value {
    match question.question_type {
        QuestionType::MultipleChoice => json!(999),
        QuestionType::SelectAll => json!([999]),
        QuestionType::FreeText => json!("definitely not the answer"),
    }
}
