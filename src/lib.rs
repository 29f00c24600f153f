//! Skillbridge: voice-assisted life-skills coaching.
//!
//! Teaches workplace and everyday skills through two conversational modes
//! backed by a remote answer service:
//! - **Ask**: free-form questions, answered in plain language
//! - **Roleplay**: practice dialogues against a persona (customer, boss)
//!   with per-turn feedback
//!
//! # Architecture
//!
//! The session controller sequences three collaborators:
//! - **Speech output**: host text-to-speech behind [`speech::SynthesisBackend`]
//! - **Speech input**: host speech recognition behind [`speech::RecognitionBackend`]
//! - **Answer service**: the remote generation endpoint via [`answers::AnswerServiceClient`]
//!
//! Quiz persistence and the anonymous identity store round out the lesson
//! experience but sit outside the voice path.

pub mod answers;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod identity;
pub mod quiz;
pub mod session;
pub mod speech;

pub use answers::{AnswerMode, AnswerServiceClient, Reply};
pub use config::AppConfig;
pub use error::{Result, SessionError};
pub use identity::IdentityStore;
pub use session::{DisplaySlot, Role, Session, SessionState, TurnReply};
