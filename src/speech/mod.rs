//! Host speech capabilities: synthesis (output) and recognition (input).
//!
//! The app does not ship speech models of its own; both directions delegate
//! to whatever the host platform provides, behind the [`SynthesisBackend`]
//! and [`RecognitionBackend`] traits. The adapters in [`output`] and
//! [`input`] add the policy the session layer relies on: preferred-voice
//! resolution, best-effort playback, single-shot listening sessions, and the
//! one-at-a-time guard.

pub mod input;
pub mod output;

pub use input::SpeechInput;
pub use output::SpeechOutput;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Instant;

/// A voice advertised by the host synthesis capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Display name the host uses for this voice (e.g. "Samantha").
    pub name: String,
    /// Whether the host considers this its default voice.
    pub is_default: bool,
}

/// One utterance handed to the synthesis backend for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceRequest {
    /// Text to synthesize.
    pub text: String,
    /// Resolved voice name, or `None` for the host default.
    pub voice: Option<String>,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Rate multiplier.
    pub rate: f32,
}

/// Text recovered from one captured user utterance.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// The transcribed text.
    pub text: String,
    /// When the recognition session delivered this result.
    pub recognized_at: Instant,
}

/// Terminal outcome of a single recognition session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// The best transcript of the first recognized result.
    Transcript(String),
    /// The session ended without recognizing anything.
    NoSpeech,
    /// The recognizer reported an error mid-session.
    Failed(String),
}

/// Host text-to-speech capability.
///
/// `speak` queues playback and returns immediately; completion is never
/// reported back. `voices` may return an empty catalog until the host fires
/// its readiness signal, so callers must be prepared to re-query later.
pub trait SynthesisBackend: Send + Sync {
    /// Voices currently enumerable on the host.
    fn voices(&self) -> Vec<Voice>;

    /// Begin playback of `request`. Returns once playback is queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the utterance.
    fn speak(&self, request: UtteranceRequest) -> Result<()>;

    /// Cancel in-progress and queued playback. No-op when nothing is playing.
    fn cancel(&self);
}

/// Host speech-to-text capability.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Whether the host exposes speech recognition at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Run one single-shot, non-continuous recognition session in `locale`
    /// and resolve with its terminal outcome.
    async fn recognize(&self, locale: &str) -> RecognitionOutcome;
}

/// Synthesis backend for hosts without audio output. Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSynthesis;

impl SynthesisBackend for NullSynthesis {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&self, _request: UtteranceRequest) -> Result<()> {
        Ok(())
    }

    fn cancel(&self) {}
}

/// Recognition backend for hosts without a recognizer. Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecognition;

#[async_trait]
impl RecognitionBackend for NoRecognition {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize(&self, _locale: &str) -> RecognitionOutcome {
        RecognitionOutcome::Failed("speech recognition is not available".to_owned())
    }
}
