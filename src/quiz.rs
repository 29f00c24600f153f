//! Lesson quizzes: question data, scoring, and server-side persistence.
//!
//! Answers are saved per anonymous user under a quiz key
//! (`POST/GET /api/quiz/{key}/` with the `X-User-Id` header), so a learner
//! can close the app and find their selections restored. Unanswered
//! questions are represented as `None` and serialize as JSON `null`.

use crate::config::AnswerServiceConfig;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Header carrying the anonymous user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Quiz key for the email lesson.
pub const EMAIL_QUIZ_KEY: &str = "email_quiz";

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option.
    pub answer: usize,
}

/// A user's selections, one entry per question (`None` = unanswered).
pub type QuizAnswers = Vec<Option<usize>>;

/// Count correct selections.
#[must_use]
pub fn score(questions: &[QuizQuestion], answers: &[Option<usize>]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.answer))
        .count()
}

/// The built-in email-lesson question set.
#[must_use]
pub fn email_quiz() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            question: "What is the purpose of a subject line in an email?".to_owned(),
            options: vec![
                "To write your full name".to_owned(),
                "To tell the reader what the email is about".to_owned(),
                "To include emojis".to_owned(),
                "To say thank you".to_owned(),
            ],
            answer: 1,
        },
        QuizQuestion {
            question: "Which of these is a professional greeting?".to_owned(),
            options: vec![
                "Hey buddy!".to_owned(),
                "Yo!".to_owned(),
                "Dear Hiring Manager,".to_owned(),
                "Sup?".to_owned(),
            ],
            answer: 2,
        },
        QuizQuestion {
            question: "What should go at the end of a professional email?".to_owned(),
            options: vec![
                "Your favorite quote".to_owned(),
                "A joke".to_owned(),
                "A closing and your name".to_owned(),
                "Nothing at all".to_owned(),
            ],
            answer: 2,
        },
    ]
}

#[derive(Serialize, Deserialize)]
struct AnswersEnvelope {
    #[serde(default)]
    answers: QuizAnswers,
}

/// HTTP client for quiz persistence.
pub struct QuizClient {
    base_url: String,
    user_id: String,
    client: reqwest::Client,
}

impl QuizClient {
    /// Build a client for one anonymous user.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AnswerServiceConfig, user_id: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SessionError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.clone(),
            user_id: user_id.to_owned(),
            client,
        })
    }

    fn quiz_url(&self, quiz_key: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/api/quiz/{quiz_key}/")
    }

    /// Persist the user's selections for `quiz_key`.
    ///
    /// Unlike the voice path, persistence failures propagate: the caller
    /// decides whether to tell the user their progress was not saved.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn save_answers(&self, quiz_key: &str, answers: &[Option<usize>]) -> Result<()> {
        let url = self.quiz_url(quiz_key);
        debug!(%url, "saving quiz answers");
        self.client
            .post(&url)
            .header(USER_ID_HEADER, &self.user_id)
            .json(&AnswersEnvelope {
                answers: answers.to_vec(),
            })
            .send()
            .await
            .map_err(|e| SessionError::Quiz(format!("save failed: {e}")))?
            .error_for_status()
            .map_err(|e| SessionError::Quiz(format!("save rejected: {e}")))?;
        Ok(())
    }

    /// Load previously saved selections for `quiz_key` (empty when none).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// malformed response body.
    pub async fn load_answers(&self, quiz_key: &str) -> Result<QuizAnswers> {
        let url = self.quiz_url(quiz_key);
        debug!(%url, "loading quiz answers");
        let envelope: AnswersEnvelope = self
            .client
            .get(&url)
            .header(USER_ID_HEADER, &self.user_id)
            .send()
            .await
            .map_err(|e| SessionError::Quiz(format!("load failed: {e}")))?
            .error_for_status()
            .map_err(|e| SessionError::Quiz(format!("load rejected: {e}")))?
            .json()
            .await
            .map_err(|e| SessionError::Quiz(format!("malformed response: {e}")))?;
        Ok(envelope.answers)
    }
}
