//! Configuration types for the coaching session stack.

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the answer-service base URL.
pub const API_URL_ENV: &str = "SKILLBRIDGE_API_URL";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answer service (remote text generation) settings.
    pub answers: AnswerServiceConfig,
    /// Speech output (synthesis) settings.
    pub voice: VoiceConfig,
    /// Speech input (recognition) settings.
    pub recognition: RecognitionConfig,
}

/// Answer service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerServiceConfig {
    /// Base URL of the remote generation endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AnswerServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://skillbridge-d7z9.onrender.com".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

/// Speech output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Voice names to try, in order, against the host catalog.
    pub preferred_voices: Vec<String>,
    /// Playback pitch multiplier.
    pub pitch: f32,
    /// Playback rate multiplier.
    pub rate: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            preferred_voices: vec![
                "Daniel".to_owned(),
                "Samantha".to_owned(),
                "Karen".to_owned(),
            ],
            pitch: 1.1,
            rate: 0.9,
        }
    }
}

/// Speech input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// BCP 47 locale tag for recognition sessions.
    pub locale: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_owned(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file, falling back to
    /// defaults when the file does not exist, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&crate::app_dirs::config_file())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific path (missing file = defaults).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Config(format!("failed to read config ({}): {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            SessionError::Config(format!("invalid config ({}): {e}", path.display()))
        })
    }

    /// Write configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or write failure.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)
            .map_err(|e| SessionError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Overlay environment-provided settings onto the loaded config.
    ///
    /// Currently only `SKILLBRIDGE_API_URL` is honoured.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.answers.base_url = url.trim().to_owned();
        }
    }
}
