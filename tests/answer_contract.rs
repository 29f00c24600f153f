//! Answer service contract tests.
//!
//! Verify the exact HTTP shape the client puts on the wire (endpoint per
//! mode, JSON body) and how it handles each response form: `answer`,
//! `error`, neither, non-JSON, and transport failure.

use skillbridge::answers::{AnswerMode, AnswerServiceClient, EMPTY_REPLY, FALLBACK_REPLY};
use skillbridge::config::AnswerServiceConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnswerServiceClient {
    AnswerServiceClient::new(&AnswerServiceConfig {
        base_url: server.uri(),
        request_timeout_secs: 5,
    })
    .expect("client")
}

#[tokio::test]
async fn explain_mode_posts_question_to_explain_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .and(body_partial_json(json!({"question": "What is a resume?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "A resume lists your work history."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .ask("What is a resume?", AnswerMode::Explain)
        .await;

    assert_eq!(reply.text, "A resume lists your work history.");
    assert!(!reply.is_fallback);
}

#[tokio::test]
async fn feedback_mode_posts_to_feedback_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feedback/"))
        .and(body_partial_json(json!({"question": "I would say sorry."})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "Good instinct!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The explain endpoint must not be touched in feedback mode.
    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "wrong"})))
        .expect(0)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .ask("I would say sorry.", AnswerMode::Feedback)
        .await;

    assert_eq!(reply.text, "Good instinct!");
}

#[tokio::test]
async fn markdown_is_stripped_from_answers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "# Open it *carefully*"
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .ask("How do I open a door?", AnswerMode::Explain)
        .await;

    assert_eq!(reply.text, "Open it carefully");
    assert!(!reply.is_fallback);
}

#[tokio::test]
async fn server_error_field_is_shown_as_the_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "No question provided"
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server).ask("hm", AnswerMode::Explain).await;

    // The service's own message is displayed, not the local fallback.
    assert_eq!(reply.text, "No question provided");
    assert!(!reply.is_fallback);
}

#[tokio::test]
async fn response_with_neither_field_becomes_no_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let reply = client_for(&server).ask("hello", AnswerMode::Explain).await;
    assert_eq!(reply.text, EMPTY_REPLY);
    assert!(!reply.is_fallback);
}

#[tokio::test]
async fn non_json_response_yields_the_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let reply = client_for(&server).ask("hello", AnswerMode::Explain).await;
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert!(reply.is_fallback);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnswerServiceClient::new(&AnswerServiceConfig {
        base_url: format!("{}/", server.uri()),
        request_timeout_secs: 5,
    })
    .expect("client");

    let reply = client.ask("hello", AnswerMode::Explain).await;
    assert_eq!(reply.text, "ok");
}
