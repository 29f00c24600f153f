//! Error types for the skillbridge session stack.

/// Top-level error type for the coaching session system.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The host exposes no speech recognition capability.
    #[error("speech recognition is not available on this device")]
    CapabilityUnavailable,

    /// A recognition session is already active.
    #[error("a listening session is already in progress")]
    RecognizerBusy,

    /// An answer-service request is already in flight for this session.
    #[error("a reply is still being generated")]
    RequestInFlight,

    /// The submitted prompt was empty after trimming.
    #[error("nothing to send: the prompt is empty")]
    EmptyPrompt,

    /// The requested operation is not valid in the current session state.
    #[error("invalid session transition: {0}")]
    InvalidTransition(String),

    /// Speech recognition failed mid-session.
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis error (callers treat synthesis as best-effort).
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Identity storage error.
    #[error("identity error: {0}")]
    Identity(String),

    /// Quiz persistence error.
    #[error("quiz error: {0}")]
    Quiz(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SessionError>;
