//! Quiz persistence contract tests: header, body shape, and error paths.

use serde_json::json;
use skillbridge::config::AnswerServiceConfig;
use skillbridge::quiz::{EMAIL_QUIZ_KEY, QuizClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, user_id: &str) -> QuizClient {
    QuizClient::new(
        &AnswerServiceConfig {
            base_url: server.uri(),
            request_timeout_secs: 5,
        },
        user_id,
    )
    .expect("client")
}

#[tokio::test]
async fn save_posts_answers_with_user_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quiz/email_quiz/"))
        .and(header("X-User-Id", "user_abc123"))
        .and(body_partial_json(json!({"answers": [1, null, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, "user_abc123")
        .save_answers(EMAIL_QUIZ_KEY, &[Some(1), None, Some(2)])
        .await
        .expect("save");
}

#[tokio::test]
async fn load_returns_saved_answers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/quiz/email_quiz/"))
        .and(header("X-User-Id", "user_abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answers": [1, 2, null]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answers = client_for(&server, "user_abc123")
        .load_answers(EMAIL_QUIZ_KEY)
        .await
        .expect("load");

    assert_eq!(answers, vec![Some(1), Some(2), None]);
}

#[tokio::test]
async fn load_with_no_saved_answers_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/quiz/email_quiz/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let answers = client_for(&server, "user_x")
        .load_answers(EMAIL_QUIZ_KEY)
        .await
        .expect("load");
    assert!(answers.is_empty());
}

#[tokio::test]
async fn save_failure_propagates_unlike_the_voice_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quiz/email_quiz/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server, "user_x")
        .save_answers(EMAIL_QUIZ_KEY, &[Some(0)])
        .await;
    assert!(result.is_err());
}
