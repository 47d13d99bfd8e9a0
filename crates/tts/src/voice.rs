use std::collections::BTreeSet;

use wordcast_config::{DEFAULT_VOICE, DEFAULT_VOICES, TtsConfig};

/// Closed set of voices the service will synthesize with
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    voices: BTreeSet<String>,
    default_voice: String,
}

impl VoiceCatalog {
    /// Build a catalog; `default_voice` is added when missing from `voices`
    pub fn new<I, S>(voices: I, default_voice: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default_voice = default_voice.into();
        let mut voices: BTreeSet<String> = voices.into_iter().map(Into::into).collect();
        voices.insert(default_voice.clone());

        Self { voices, default_voice }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::new(config.voices.iter().cloned(), config.default_voice.clone())
    }

    pub fn is_valid(&self, voice: &str) -> bool {
        self.voices.contains(voice)
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Language-region prefix of a `lang-REGION-Speaker` identifier
    pub fn locale(voice: &str) -> Option<&str> {
        let mut dashes = voice.match_indices('-').map(|(index, _)| index);
        let _language_end = dashes.next()?;
        let region_end = dashes.next()?;

        Some(&voice[..region_end])
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_VOICES, DEFAULT_VOICE)
    }
}
