//! Speech output adapter: best-effort playback with preferred-voice lookup.
//!
//! Voice availability is eventually consistent: some hosts cannot enumerate
//! voices until a readiness event fires, so resolution is retried lazily on
//! each `speak` until a preferred voice is found. Synthesis failures are
//! logged and swallowed — audio is a best-effort channel and must never
//! block the text flow.

use crate::config::VoiceConfig;
use crate::speech::{SynthesisBackend, UtteranceRequest};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Text-to-speech adapter over a host [`SynthesisBackend`].
pub struct SpeechOutput<B> {
    backend: B,
    config: VoiceConfig,
    /// Preferred voice resolved against the host catalog, once found.
    resolved_voice: Mutex<Option<String>>,
}

impl<B: SynthesisBackend> SpeechOutput<B> {
    pub fn new(backend: B, config: VoiceConfig) -> Self {
        Self {
            backend,
            config,
            resolved_voice: Mutex::new(None),
        }
    }

    /// Speak `text` without blocking the caller.
    ///
    /// Failures are logged and swallowed; there is no success signal.
    pub fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let request = UtteranceRequest {
            text: text.to_owned(),
            voice: self.resolve_voice(),
            pitch: self.config.pitch,
            rate: self.config.rate,
        };
        if let Err(e) = self.backend.speak(request) {
            warn!(error = %e, "speech synthesis failed; audio skipped");
        }
    }

    /// Cancel any in-progress or queued playback. Safe to call when idle.
    pub fn stop(&self) {
        self.backend.cancel();
    }

    /// Match the host catalog against the preference list, caching a hit.
    ///
    /// Returns `None` (host default voice) while the catalog is empty or no
    /// preferred name is present; an empty catalog is retried on the next
    /// call since voices may appear after the host readiness event.
    fn resolve_voice(&self) -> Option<String> {
        let mut cached = match self.resolved_voice.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(name) = cached.as_ref() {
            return Some(name.clone());
        }

        let voices = self.backend.voices();
        if voices.is_empty() {
            debug!("voice catalog not ready; using host default voice");
            return None;
        }

        for preferred in &self.config.preferred_voices {
            if voices.iter().any(|v| &v.name == preferred) {
                debug!(voice = %preferred, "resolved preferred voice");
                *cached = Some(preferred.clone());
                return Some(preferred.clone());
            }
        }

        debug!("no preferred voice in catalog; using host default voice");
        None
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::error::Result;
    use crate::speech::{NullSynthesis, Voice};
    use std::sync::Mutex as StdMutex;

    /// Backend that records requests and serves a scripted voice catalog.
    #[derive(Default)]
    struct ScriptedSynthesis {
        catalogs: StdMutex<Vec<Vec<Voice>>>,
        spoken: StdMutex<Vec<UtteranceRequest>>,
        cancels: StdMutex<usize>,
    }

    impl ScriptedSynthesis {
        fn with_catalogs(catalogs: Vec<Vec<Voice>>) -> Self {
            Self {
                catalogs: StdMutex::new(catalogs),
                ..Self::default()
            }
        }
    }

    impl SynthesisBackend for ScriptedSynthesis {
        fn voices(&self) -> Vec<Voice> {
            let mut catalogs = self.catalogs.lock().unwrap();
            if catalogs.len() > 1 {
                catalogs.remove(0)
            } else {
                catalogs.first().cloned().unwrap_or_default()
            }
        }

        fn speak(&self, request: UtteranceRequest) -> Result<()> {
            self.spoken.lock().unwrap().push(request);
            Ok(())
        }

        fn cancel(&self) {
            *self.cancels.lock().unwrap() += 1;
        }
    }

    fn voice(name: &str) -> Voice {
        Voice {
            name: name.to_owned(),
            is_default: false,
        }
    }

    #[test]
    fn picks_first_preferred_voice_and_applies_pitch_rate() {
        let backend = ScriptedSynthesis::with_catalogs(vec![vec![
            voice("Alex"),
            voice("Samantha"),
            voice("Daniel"),
        ]]);
        let output = SpeechOutput::new(backend, VoiceConfig::default());

        output.speak("hello there");

        let spoken = output.backend.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].voice.as_deref(), Some("Daniel"));
        assert!((spoken[0].pitch - 1.1).abs() < f32::EPSILON);
        assert!((spoken[0].rate - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn falls_back_to_host_default_when_no_preferred_match() {
        let backend = ScriptedSynthesis::with_catalogs(vec![vec![voice("Alex"), voice("Fred")]]);
        let output = SpeechOutput::new(backend, VoiceConfig::default());

        output.speak("hello");

        let spoken = output.backend.spoken.lock().unwrap();
        assert_eq!(spoken[0].voice, None);
    }

    #[test]
    fn empty_catalog_is_retried_until_voices_appear() {
        // First query: catalog not ready. Second: Karen appears.
        let backend =
            ScriptedSynthesis::with_catalogs(vec![Vec::new(), vec![voice("Karen")]]);
        let output = SpeechOutput::new(backend, VoiceConfig::default());

        output.speak("first");
        output.speak("second");
        output.speak("third");

        let spoken = output.backend.spoken.lock().unwrap();
        assert_eq!(spoken[0].voice, None);
        assert_eq!(spoken[1].voice.as_deref(), Some("Karen"));
        // Third call uses the cached resolution without re-querying.
        assert_eq!(spoken[2].voice.as_deref(), Some("Karen"));
    }

    #[test]
    fn blank_text_is_not_sent_to_the_backend() {
        let backend = ScriptedSynthesis::default();
        let output = SpeechOutput::new(backend, VoiceConfig::default());

        output.speak("   ");

        assert!(output.backend.spoken.lock().unwrap().is_empty());
    }

    #[test]
    fn stop_with_nothing_playing_is_a_noop_and_speak_still_works() {
        let backend = ScriptedSynthesis::with_catalogs(vec![vec![voice("Samantha")]]);
        let output = SpeechOutput::new(backend, VoiceConfig::default());

        output.stop();
        output.stop();
        output.speak("still fine");

        assert_eq!(*output.backend.cancels.lock().unwrap(), 2);
        assert_eq!(output.backend.spoken.lock().unwrap().len(), 1);
    }

    #[test]
    fn null_backend_accepts_everything() {
        let output = SpeechOutput::new(NullSynthesis, VoiceConfig::default());
        output.speak("goes nowhere");
        output.stop();
    }
}
