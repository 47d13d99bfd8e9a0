use serde::{Deserialize, Serialize};

use crate::{error::TtsError, voice::VoiceCatalog};

/// Form fields accepted by `POST /tts/`
///
/// `lang` is the historical name of the voice field; `voice` wins when both
/// are sent. Blank fields count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SpeechForm {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

impl SpeechForm {
    pub fn voice<'a>(&'a self) -> Option<&'a str> {
        let present = |field: Option<&'a str>| field.filter(|value| !value.trim().is_empty());
        present(self.voice.as_deref()).or_else(|| present(self.lang.as_deref()))
    }
}

/// Validated (text, voice) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    voice: String,
}

impl SynthesisRequest {
    /// Check text and voice against the catalog
    ///
    /// The voice is trimmed; the text is kept verbatim since it is part of
    /// the cache identity.
    pub fn validate(text: &str, voice: &str, catalog: &VoiceCatalog) -> Result<Self, TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidRequest("text must not be empty".to_owned()));
        }

        let voice = voice.trim();
        if !catalog.is_valid(voice) {
            return Err(TtsError::InvalidRequest(format!("invalid voice: '{voice}'")));
        }

        Ok(Self {
            text: text.to_owned(),
            voice: voice.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }
}

/// Successful synthesis response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechResponse {
    /// Public URL of the audio object
    pub url: String,
}
