use std::{path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Voices accepted when the configuration does not list its own
pub const DEFAULT_VOICES: [&str; 14] = [
    "en-US-EricNeural",
    "zh-CN-XiaoxiaoNeural",
    "ja-JP-DaichiNeural",
    "ko-KR-BongJinNeural",
    "fr-FR-AlainNeural",
    "de-DE-AmalaNeural",
    "es-ES-NilNeural",
    "ru-RU-DariyaNeural",
    "it-IT-BenignoNeural",
    "pt-PT-DuarteNeural",
    "ar-SA-HamedNeural",
    "th-TH-AcharaNeural",
    "vi-VN-HoaiMyNeural",
    "hi-IN-AaravNeural",
];

/// Voice used when a request does not name one
pub const DEFAULT_VOICE: &str = "en-US-EricNeural";

/// Top-level TTS configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Voice applied to requests without a `lang`/`voice` field
    #[serde(default = "default_voice")]
    pub default_voice: String,
    /// Closed set of accepted voice identifiers
    #[serde(default = "default_voices")]
    pub voices: Vec<String>,
    /// Directory for request-scoped audio spool files
    ///
    /// Falls back to the system temporary directory.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    /// Speech synthesis provider
    pub synthesis: SynthesisConfig,
}

impl TtsConfig {
    /// Directory spool files are created in
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Configuration for the speech synthesis provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: SynthesisProviderType,
    /// Azure region, used to derive the endpoint when none is given
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint override (takes precedence over `region`)
    #[serde(default)]
    pub endpoint: Option<Url>,
    /// Subscription key
    pub api_key: SecretString,
    /// Deadline for a single synthesis attempt
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Additional attempts after a transient upstream failure
    #[serde(default)]
    pub max_retries: u32,
    /// Delay between attempts
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl SynthesisConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub const fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Base URL of the synthesis service, without a trailing slash
    pub fn base_url(&self) -> Option<String> {
        if let Some(ref endpoint) = self.endpoint {
            return Some(endpoint.as_str().trim_end_matches('/').to_owned());
        }

        self.region
            .as_deref()
            .filter(|region| !region.is_empty())
            .map(|region| format!("https://{region}.tts.speech.microsoft.com"))
    }
}

/// Supported synthesis providers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisProviderType {
    /// Azure Cognitive Services neural TTS
    #[default]
    Azure,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_owned()
}

fn default_voices() -> Vec<String> {
    DEFAULT_VOICES.iter().map(|&voice| voice.to_owned()).collect()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_retry_backoff_ms() -> u64 {
    250
}
