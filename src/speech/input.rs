//! Speech input adapter: single-shot recognition sessions.
//!
//! One utterance per session, fixed locale, no interim results. A session
//! that ends in silence or a recognizer error delivers no transcript; the
//! caller's listening indicator goes back to inactive either way. Only one
//! session may be active at a time — a second `listen` is rejected rather
//! than raced or queued.

use crate::config::RecognitionConfig;
use crate::error::{Result, SessionError};
use crate::speech::{RecognitionBackend, RecognitionOutcome, Transcript};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Speech-to-text adapter over a host [`RecognitionBackend`].
pub struct SpeechInput<B> {
    backend: B,
    locale: String,
    active: AtomicBool,
}

/// Clears the active flag even if the listen future is dropped mid-session.
struct ActiveGuard<'a>(&'a AtomicBool);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<B: RecognitionBackend> SpeechInput<B> {
    pub fn new(backend: B, config: RecognitionConfig) -> Self {
        Self {
            backend,
            locale: config.locale,
            active: AtomicBool::new(false),
        }
    }

    /// Whether a recognition session is currently active.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Run one recognition session and return its transcript, if any.
    ///
    /// `Ok(None)` means the session ended without a usable result (silence
    /// or a mid-session recognizer error); both cases are terminal for the
    /// turn and the user must trigger a new session to retry.
    ///
    /// # Errors
    ///
    /// [`SessionError::CapabilityUnavailable`] when the host has no
    /// recognizer — callers must surface this to the user, not swallow it.
    /// [`SessionError::RecognizerBusy`] when a session is already active.
    pub async fn listen(&self) -> Result<Option<Transcript>> {
        if !self.backend.is_available() {
            return Err(SessionError::CapabilityUnavailable);
        }
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(SessionError::RecognizerBusy);
        }
        let _guard = ActiveGuard(&self.active);

        debug!(locale = %self.locale, "recognition session started");
        match self.backend.recognize(&self.locale).await {
            RecognitionOutcome::Transcript(text) => {
                debug!("recognized: \"{text}\"");
                Ok(Some(Transcript {
                    text,
                    recognized_at: Instant::now(),
                }))
            }
            RecognitionOutcome::NoSpeech => {
                debug!("recognition session ended without a result");
                Ok(None)
            }
            RecognitionOutcome::Failed(message) => {
                warn!(error = %message, "recognition error; no transcript produced");
                Ok(None)
            }
        }
    }
}
