use std::{path::PathBuf, sync::Arc, time::Duration};

use wordcast_config::SynthesisConfig;
use wordcast_storage::{AUDIO_CONTENT_TYPE, ArtifactStore, CacheKey, CatalogIndex, CatalogRecord};

use crate::{
    error::{Result, TtsError},
    provider::{SynthesisClient, SynthesisError},
    spool::AudioSpool,
    types::SynthesisRequest,
    voice::VoiceCatalog,
};

/// Deadline and retry budget for calls to the speech engine
#[derive(Debug, Clone, Copy)]
pub struct SynthesisPolicy {
    /// Deadline for a single attempt
    pub timeout: Duration,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    /// Delay between attempts
    pub backoff: Duration,
}

impl SynthesisPolicy {
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_retries: config.max_retries,
            backoff: config.retry_backoff(),
        }
    }
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Result of a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    pub url: String,
    pub key: CacheKey,
    /// Served from the catalog without synthesizing
    pub cache_hit: bool,
}

/// Drives one request from validation to a public URL
///
/// Catalog hits short-circuit everything else. On a miss the audio is
/// synthesized into a scratch spool, uploaded under its cache key, and
/// recorded in the catalog. The catalog write is the only step whose failure
/// does not fail the request.
pub struct SynthesisOrchestrator {
    voices: Arc<VoiceCatalog>,
    synthesizer: Arc<dyn SynthesisClient>,
    store: Arc<dyn ArtifactStore>,
    catalog: Arc<dyn CatalogIndex>,
    scratch_dir: PathBuf,
    policy: SynthesisPolicy,
}

impl SynthesisOrchestrator {
    pub fn new(
        voices: Arc<VoiceCatalog>,
        synthesizer: Arc<dyn SynthesisClient>,
        store: Arc<dyn ArtifactStore>,
        catalog: Arc<dyn CatalogIndex>,
        scratch_dir: PathBuf,
        policy: SynthesisPolicy,
    ) -> Self {
        Self {
            voices,
            synthesizer,
            store,
            catalog,
            scratch_dir,
            policy,
        }
    }

    pub fn voices(&self) -> &VoiceCatalog {
        &self.voices
    }

    pub fn synthesizer(&self) -> &Arc<dyn SynthesisClient> {
        &self.synthesizer
    }

    pub fn scratch_dir(&self) -> &std::path::Path {
        &self.scratch_dir
    }

    pub const fn policy(&self) -> SynthesisPolicy {
        self.policy
    }

    /// Return a public URL for `text` spoken with `voice`
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<SynthesisOutcome> {
        let request = SynthesisRequest::validate(text, voice, &self.voices)?;
        let key = CacheKey::derive(request.voice(), request.text());

        match self.catalog.find(request.text(), request.voice()).await {
            Ok(Some(record)) => {
                tracing::debug!(key = %key, voice = request.voice(), "catalog hit");

                return Ok(SynthesisOutcome {
                    url: record.audio_url,
                    key,
                    cache_hit: true,
                });
            }
            Ok(None) => tracing::debug!(key = %key, voice = request.voice(), "catalog miss"),
            Err(e) => tracing::warn!(key = %key, "catalog lookup failed, synthesizing anyway: {e}"),
        }

        let mut spool = AudioSpool::create(&self.scratch_dir).map_err(|e| {
            tracing::error!(key = %key, "failed to create audio spool: {e}");
            TtsError::InternalError(None)
        })?;

        self.synthesize_into(&request, &key, &mut spool).await?;

        let audio = spool.read_all().await.map_err(|e| {
            tracing::error!(key = %key, "failed to read audio spool: {e}");
            TtsError::InternalError(None)
        })?;
        drop(spool);

        let bytes = audio.len();
        self.store
            .upload(&key, audio, AUDIO_CONTENT_TYPE)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, "audio upload failed: {e}");
                TtsError::StorageWriteFailed(e.to_string())
            })?;

        tracing::debug!(key = %key, bytes, "audio uploaded");

        let url = self.store.public_url(&key);

        let record = CatalogRecord {
            text: request.text().to_owned(),
            voice: request.voice().to_owned(),
            audio_url: url.clone(),
        };

        if let Err(e) = self.catalog.insert(&record).await {
            tracing::warn!(key = %key, "catalog insert failed, audio remains reachable: {e}");
        }

        tracing::info!(key = %key, voice = request.voice(), bytes, "synthesized new audio");

        Ok(SynthesisOutcome {
            url,
            key,
            cache_hit: false,
        })
    }

    /// Run the engine under the policy's deadline, retrying transient failures
    async fn synthesize_into(&self, request: &SynthesisRequest, key: &CacheKey, spool: &mut AudioSpool) -> Result<()> {
        let mut attempt = 0;

        loop {
            let result = tokio::time::timeout(
                self.policy.timeout,
                self.synthesizer.synthesize(request.text(), request.voice(), spool),
            )
            .await
            .unwrap_or_else(|_| Err(SynthesisError::Timeout(self.policy.timeout)));

            let Err(error) = result else {
                return Ok(());
            };

            if !error.is_retryable() || attempt >= self.policy.max_retries {
                tracing::error!(
                    key = %key,
                    provider = self.synthesizer.name(),
                    attempts = attempt + 1,
                    "synthesis failed: {error}"
                );
                return Err(error.into());
            }

            attempt += 1;
            tracing::warn!(key = %key, attempt, "synthesis attempt failed, retrying: {error}");

            spool
                .reset()
                .await
                .map_err(|e| TtsError::from(SynthesisError::Spool(e.to_string())))?;
            tokio::time::sleep(self.policy.backoff).await;
        }
    }
}
