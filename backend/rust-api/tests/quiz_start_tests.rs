mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn start_requires_an_identity() {
    let app = common::create_test_app();

    let (status, body) = common::post_json(&app, "/api/quiz/start", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("guestToken"));
}

#[tokio::test]
async fn blank_guest_token_is_not_an_identity() {
    let app = common::create_test_app();

    let (status, _) =
        common::post_json(&app, "/api/quiz/start", json!({ "guestToken": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn start_returns_todays_question_without_answer_keys() {
    let app = common::create_test_app();
    let guest = format!("guest-{}", Uuid::new_v4());

    let (_, today) = common::get_json(&app, "/api/quiz/today").await;
    let (status, body) =
        common::post_json(&app, "/api/quiz/start", json!({ "guestToken": guest })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyStarted"], false);
    assert_eq!(body["quizDate"], today["quizDate"]);

    let question = body["question"].as_object().unwrap();
    assert_eq!(question["id"], today["questionId"]);
    assert!(question.contains_key("prompt"));
    assert!(!question.contains_key("correctIndex"));
    assert!(!question.contains_key("correctIndices"));
    assert!(!question.contains_key("acceptedAnswers"));
    assert!(!question.contains_key("explanation"));
}

#[tokio::test]
async fn repeat_start_is_idempotent() {
    let app = common::create_test_app();
    let guest = format!("guest-{}", Uuid::new_v4());

    let (_, first) =
        common::post_json(&app, "/api/quiz/start", json!({ "guestToken": guest })).await;
    let (status, second) =
        common::post_json(&app, "/api/quiz/start", json!({ "guestToken": guest })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["alreadyStarted"], false);
    assert_eq!(second["alreadyStarted"], true);
    assert_eq!(first["question"]["id"], second["question"]["id"]);

    // No attempts were burned by starting twice: the first submission is
    // still attempt number 1
    let questions = common::test_questions();
    let question_id = first["question"]["id"].as_str().unwrap();
    let question = common::question_by_id(&questions, question_id);
    let (_, submit) = common::post_json(
        &app,
        "/api/quiz/submit",
        json!({
            "guestToken": guest,
            "questionId": question_id,
            "answer": common::wrong_answer(question),
            "elapsedMs": 1500
        }),
    )
    .await;
    assert_eq!(submit["attemptNumber"], 1);
}

#[tokio::test]
async fn authenticated_user_can_start_without_guest_token() {
    let app = common::create_test_app();
    let bearer = common::bearer_for(&format!("user-{}", Uuid::new_v4()));

    let (status, body) =
        common::post_json_with_auth(&app, "/api/quiz/start", json!({}), Some(&bearer)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyStarted"], false);
    assert!(body["question"].is_object());
}

#[tokio::test]
async fn invalid_bearer_token_falls_back_to_guest() {
    let app = common::create_test_app();
    let guest = format!("guest-{}", Uuid::new_v4());

    let (status, body) = common::post_json_with_auth(
        &app,
        "/api/quiz/start",
        json!({ "guestToken": guest }),
        Some("Bearer not-a-real-token"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["question"].is_object());
}

#[tokio::test]
async fn start_with_empty_catalog_is_not_found() {
    let app = common::create_test_app_with_questions(vec![]);

    let (status, body) =
        common::post_json(&app, "/api/quiz/start", json!({ "guestToken": "g-1" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No quiz available today");
    assert!(body["quizDate"].is_string());
}
