//! Roleplay session controller.
//!
//! Owns the conversation mode/role state machine and sequences the three
//! collaborators: speech output, speech input, and the answer service.
//!
//! States: `Idle` → `AskMode` (free-form Q&A) or `RoleplaySelecting` →
//! `RoleplayActive { role }`. Neither branch returns to `Idle` on its own;
//! only [`Session::reset`] does. The role lives inside the `RoleplayActive`
//! variant, so ask mode cannot carry a role by construction.
//!
//! Concurrency rules enforced here: at most one answer request in flight
//! per session (a second submission is rejected, and the flag is released
//! by a drop guard even if the turn future is abandoned), and opening a
//! listening window cancels any in-progress playback first.

use crate::answers::{AnswerMode, AnswerServiceClient, Reply};
use crate::config::AppConfig;
use crate::error::{Result, SessionError};
use crate::speech::{RecognitionBackend, SpeechInput, SpeechOutput, SynthesisBackend};
use std::cell::Cell;
use tracing::{debug, info};

/// Persona the answer service plays during roleplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Boss,
}

impl Role {
    /// Fixed opening line spoken when this role is selected.
    #[must_use]
    pub fn opening_prompt(self) -> &'static str {
        match self {
            Self::Customer => "Hi, I'm looking for something specific. Can you help me find it?",
            Self::Boss => "Tell me about your performance this week.",
        }
    }

    /// Human-readable role name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Boss => "boss",
        }
    }
}

/// Conversation state. Mode is chosen once per session and never reverts
/// without a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No mode chosen yet.
    #[default]
    Idle,
    /// Free-form question answering.
    AskMode,
    /// Roleplay chosen, role not yet picked.
    RoleplaySelecting,
    /// Roleplay running as `role`.
    RoleplayActive { role: Role },
}

/// Which display slot a reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySlot {
    /// Ask-mode replies.
    Answer,
    /// Roleplay feedback replies.
    Feedback,
}

/// Who produced an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Ai,
}

/// One exchange record in the session transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

/// Outcome of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Display slot the reply routes to.
    pub slot: DisplaySlot,
    /// Normalized reply text (also spoken).
    pub text: String,
    /// True when the text is the local failure fallback, not a real answer.
    pub is_fallback: bool,
}

/// Conversation controller generic over the host speech backends.
pub struct Session<S, R> {
    answers: AnswerServiceClient,
    output: SpeechOutput<S>,
    input: SpeechInput<R>,
    state: SessionState,
    history: Vec<Utterance>,
    latest_answer: Option<String>,
    latest_feedback: Option<String>,
    request_in_flight: Cell<bool>,
}

/// Releases the in-flight flag when the turn completes or is dropped.
struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: SynthesisBackend, R: RecognitionBackend> Session<S, R> {
    /// Build a session from configuration and host speech backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer-service client cannot be constructed.
    pub fn new(config: &AppConfig, synthesis: S, recognition: R) -> Result<Self> {
        Ok(Self {
            answers: AnswerServiceClient::new(&config.answers)?,
            output: SpeechOutput::new(synthesis, config.voice.clone()),
            input: SpeechInput::new(recognition, config.recognition.clone()),
            state: SessionState::Idle,
            history: Vec::new(),
            latest_answer: None,
            latest_feedback: None,
            request_in_flight: Cell::new(false),
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Full in-memory transcript of this session.
    #[must_use]
    pub fn history(&self) -> &[Utterance] {
        &self.history
    }

    /// Most recent ask-mode reply.
    #[must_use]
    pub fn latest_answer(&self) -> Option<&str> {
        self.latest_answer.as_deref()
    }

    /// Most recent roleplay feedback reply.
    #[must_use]
    pub fn latest_feedback(&self) -> Option<&str> {
        self.latest_feedback.as_deref()
    }

    /// Whether a recognition session is currently active.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.input.is_listening()
    }

    /// Enter free-form ask mode.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is still `Idle`.
    pub fn choose_ask(&mut self) -> Result<()> {
        self.transition_from_idle(SessionState::AskMode)
    }

    /// Enter roleplay mode; a role must be picked before the first turn.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is still `Idle`.
    pub fn choose_roleplay(&mut self) -> Result<()> {
        self.transition_from_idle(SessionState::RoleplaySelecting)
    }

    fn transition_from_idle(&mut self, next: SessionState) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(SessionError::InvalidTransition(format!(
                "mode already chosen ({:?})",
                self.state
            )));
        }
        info!(?next, "conversation mode selected");
        self.state = next;
        Ok(())
    }

    /// Pick a roleplay persona. Speaks the role's fixed opening line and
    /// returns it; the caller then opens the listening window (typically via
    /// [`Session::take_voice_turn`]).
    ///
    /// # Errors
    ///
    /// Rejected unless the session is in `RoleplaySelecting`.
    pub fn choose_role(&mut self, role: Role) -> Result<&'static str> {
        if self.state != SessionState::RoleplaySelecting {
            return Err(SessionError::InvalidTransition(format!(
                "role selection requires roleplay mode ({:?})",
                self.state
            )));
        }
        self.state = SessionState::RoleplayActive { role };
        let opening = role.opening_prompt();
        info!(role = role.label(), "roleplay started");
        self.history.push(Utterance {
            speaker: Speaker::Ai,
            text: opening.to_owned(),
        });
        self.output.speak(opening);
        Ok(opening)
    }

    /// Capture one spoken utterance and run it as a turn.
    ///
    /// Opening the listening window cancels any in-progress playback.
    /// Returns `Ok(None)` when the session ends without a transcript.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError::CapabilityUnavailable`] and
    /// [`SessionError::RecognizerBusy`] from the input adapter, plus any
    /// turn-level rejection from [`Session::submit`].
    pub async fn take_voice_turn(&mut self) -> Result<Option<TurnReply>> {
        if !matches!(
            self.state,
            SessionState::AskMode | SessionState::RoleplayActive { .. }
        ) {
            return Err(SessionError::InvalidTransition(
                "no conversation mode active".to_owned(),
            ));
        }
        // Never listen over our own playback.
        self.output.stop();
        let Some(transcript) = self.input.listen().await? else {
            return Ok(None);
        };
        self.submit(&transcript.text).await.map(Some)
    }

    /// Run one typed (or transcribed) turn: route the prompt to the answer
    /// service for the current mode, record and speak the reply.
    ///
    /// A failed request completes the turn with the fallback reply; no error
    /// escapes the state machine for that case.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] outside `AskMode`/`RoleplayActive`,
    /// [`SessionError::RequestInFlight`] while a turn is pending, and
    /// [`SessionError::EmptyPrompt`] for a blank submission (rejected before
    /// any network call).
    pub async fn submit(&mut self, text: &str) -> Result<TurnReply> {
        let (mode, slot) = match self.state {
            SessionState::AskMode => (AnswerMode::Explain, DisplaySlot::Answer),
            SessionState::RoleplayActive { .. } => (AnswerMode::Feedback, DisplaySlot::Feedback),
            SessionState::Idle | SessionState::RoleplaySelecting => {
                return Err(SessionError::InvalidTransition(
                    "no conversation mode active".to_owned(),
                ));
            }
        };

        if self.request_in_flight.get() {
            return Err(SessionError::RequestInFlight);
        }

        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        self.request_in_flight.set(true);
        let guard = InFlightGuard(&self.request_in_flight);

        debug!(mode = mode.endpoint(), "turn started");
        self.history.push(Utterance {
            speaker: Speaker::User,
            text: prompt.to_owned(),
        });

        let Reply { text, is_fallback } = self.answers.ask(prompt, mode).await;
        drop(guard);

        self.history.push(Utterance {
            speaker: Speaker::Ai,
            text: text.clone(),
        });
        match slot {
            DisplaySlot::Answer => self.latest_answer = Some(text.clone()),
            DisplaySlot::Feedback => self.latest_feedback = Some(text.clone()),
        }
        self.output.speak(&text);

        Ok(TurnReply {
            slot,
            text,
            is_fallback,
        })
    }

    /// Tear the session back to its initial state, as on view unmount.
    ///
    /// Cancels playback and clears mode, role, transcript, and displays.
    pub fn reset(&mut self) {
        self.output.stop();
        self.state = SessionState::Idle;
        self.history.clear();
        self.latest_answer = None;
        self.latest_feedback = None;
        info!("session reset");
    }
}
