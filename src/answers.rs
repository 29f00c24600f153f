//! Client for the remote answer-generation service.
//!
//! The service exposes one endpoint per conversation mode
//! (`/api/explain/` for free-form questions, `/api/feedback/` for roleplay
//! turns), both taking `{"question": ...}` and answering
//! `{"answer": ...}` or `{"error": ...}`.
//!
//! Replies are scrubbed of markdown punctuation before display so spoken
//! output does not read symbol names aloud. The scrub is a fixed
//! character-class removal; structural markdown (tables, nested emphasis)
//! is not sanitized.

use crate::config::AnswerServiceConfig;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Reply shown in place of a real answer when the request fails.
pub const FALLBACK_REPLY: &str = "Something went wrong while fetching from AI.";

/// Reply shown when the service answers with neither field populated.
pub const EMPTY_REPLY: &str = "No response";

/// Markdown punctuation removed from replies before display/speech.
const MARKDOWN_CHARS: &[char] = &['*', '_', '`', '>', '#', '-'];

/// Server-side generation mode, selected by conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// Free-form question answering.
    Explain,
    /// Roleplay-turn feedback.
    Feedback,
}

impl AnswerMode {
    /// Endpoint path segment for this mode.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Feedback => "feedback",
        }
    }
}

/// A normalized reply from the answer service.
///
/// `is_fallback` marks replies synthesized locally after a failed request;
/// callers treat these as ordinary turns, the flag only informs display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub is_fallback: bool,
}

#[derive(Serialize)]
struct QuestionBody<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AnswerEnvelope {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the answer service.
pub struct AnswerServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnswerServiceClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AnswerServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SessionError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    /// Submit a prompt and return a normalized reply.
    ///
    /// This never fails: transport errors and malformed responses become the
    /// fixed fallback reply. One call per turn; there are no retries.
    pub async fn ask(&self, prompt: &str, mode: AnswerMode) -> Reply {
        match self.request(prompt, mode).await {
            Ok(raw) => Reply {
                text: strip_markdown(&raw),
                is_fallback: false,
            },
            Err(e) => {
                warn!(error = %e, mode = mode.endpoint(), "answer request failed");
                Reply {
                    text: FALLBACK_REPLY.to_owned(),
                    is_fallback: true,
                }
            }
        }
    }

    async fn request(&self, prompt: &str, mode: AnswerMode) -> Result<String> {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{base}/api/{}/", mode.endpoint());
        debug!(%url, "submitting prompt");

        let response = self
            .client
            .post(&url)
            .json(&QuestionBody { question: prompt })
            .send()
            .await
            .map_err(|e| SessionError::Http(format!("request failed: {e}")))?;

        // Error statuses still carry a JSON body with an `error` field, so
        // decode before inspecting the status.
        let envelope: AnswerEnvelope = response
            .json()
            .await
            .map_err(|e| SessionError::Http(format!("malformed response: {e}")))?;

        Ok(envelope
            .answer
            .or(envelope.error)
            .unwrap_or_else(|| EMPTY_REPLY.to_owned()))
    }
}

/// Remove markdown punctuation and surrounding whitespace.
///
/// Idempotent: one pass removes every character in the blocklist, so a
/// second pass is a no-op.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKDOWN_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_owned()
}
