pub mod azure;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::spool::AudioSpool;

/// Failure of a single synthesis attempt
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Engine unreachable or rejected the request
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Engine answered successfully but returned no audio
    #[error("no audio was produced")]
    NoAudioProduced,

    /// Attempt exceeded its deadline
    #[error("synthesis timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// Local spool file could not be written
    #[error("audio spool: {0}")]
    Spool(String),
}

impl SynthesisError {
    /// Whether another attempt may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_) | Self::Timeout(_))
    }
}

/// Neural text-to-speech engine
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Synthesize `text` with `voice`, streaming encoded audio into `spool`
    async fn synthesize(&self, text: &str, voice: &str, spool: &mut AudioSpool) -> Result<(), SynthesisError>;

    /// Base URL of the engine, probed by the diagnostics endpoint
    fn endpoint(&self) -> &str;

    /// Get the provider name
    fn name(&self) -> &str;
}
