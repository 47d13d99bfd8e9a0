use std::sync::Arc;

use wordcast_config::{DiagnosticsConfig, SynthesisProviderType};
use wordcast_storage::supabase::{SupabaseCatalog, SupabaseStorage};

use crate::{
    error::{Result, TtsError},
    orchestrator::{SynthesisOrchestrator, SynthesisOutcome, SynthesisPolicy},
    provider::{SynthesisClient, azure::AzureSynthesizer},
    voice::VoiceCatalog,
};

/// TTS server shared by every request handler
pub struct Server {
    orchestrator: SynthesisOrchestrator,
    diagnostics: DiagnosticsConfig,
}

impl Server {
    pub const fn new(orchestrator: SynthesisOrchestrator, diagnostics: DiagnosticsConfig) -> Self {
        Self {
            orchestrator,
            diagnostics,
        }
    }

    /// Resolve `voice` (or the default voice) and return a URL for the audio
    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<SynthesisOutcome> {
        let voice = voice.unwrap_or_else(|| self.orchestrator.voices().default_voice());
        self.orchestrator.synthesize(text, voice).await
    }

    pub fn voices(&self) -> &VoiceCatalog {
        self.orchestrator.voices()
    }

    pub(crate) fn synthesizer(&self) -> &Arc<dyn SynthesisClient> {
        self.orchestrator.synthesizer()
    }

    pub(crate) const fn orchestrator(&self) -> &SynthesisOrchestrator {
        &self.orchestrator
    }

    pub(crate) const fn diagnostics_config(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a wordcast_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a wordcast_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let tts = &self.config.tts;
        let synthesis = &tts.synthesis;

        let synthesizer: Arc<dyn SynthesisClient> = match synthesis.provider_type {
            SynthesisProviderType::Azure => {
                let base_url = synthesis.base_url().ok_or_else(|| {
                    TtsError::ConfigError("speech synthesis requires either `region` or `endpoint`".to_owned())
                })?;

                tracing::debug!("Initializing Azure TTS provider at {base_url}");
                Arc::new(AzureSynthesizer::new(base_url, synthesis.api_key.clone()))
            }
        };

        let scratch_dir = tts.scratch_dir();
        std::fs::create_dir_all(&scratch_dir).map_err(|e| {
            TtsError::ConfigError(format!(
                "failed to create scratch directory {}: {e}",
                scratch_dir.display()
            ))
        })?;

        let voices = Arc::new(VoiceCatalog::from_config(tts));
        tracing::debug!(
            "TTS server initialized with {} voice(s), default {}",
            voices.len(),
            voices.default_voice()
        );

        let storage = &self.config.storage;
        let orchestrator = SynthesisOrchestrator::new(
            voices,
            synthesizer,
            Arc::new(SupabaseStorage::new(storage)),
            Arc::new(SupabaseCatalog::new(storage)),
            scratch_dir,
            SynthesisPolicy::from_config(synthesis),
        );

        Ok(Server::new(orchestrator, self.config.server.diagnostics.clone()))
    }
}
