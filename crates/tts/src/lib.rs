//! Text-to-speech with a persistent audio cache
//!
//! `POST /tts/` turns a (text, voice) pair into a public audio URL. The first
//! request for a pair synthesizes and stores the clip; later requests are
//! answered from the catalog.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod diagnostics;
mod error;
mod http_client;
mod orchestrator;
mod provider;
mod request;
mod server;
mod spool;
mod types;
mod voice;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};

pub use diagnostics::{DiagnosticsReport, ProbeResult};
pub use error::{Result, TtsError};
pub use orchestrator::{SynthesisOrchestrator, SynthesisOutcome, SynthesisPolicy};
pub use provider::{SynthesisClient, SynthesisError, azure::AzureSynthesizer};
pub use server::{Server, TtsServerBuilder};
pub use spool::AudioSpool;
pub use types::{SpeechForm, SpeechResponse, SynthesisRequest};
pub use voice::VoiceCatalog;
use request::ExtractForm;

/// Response header telling clients whether the catalog answered
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Build the TTS server from configuration
pub fn build_server(config: &wordcast_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/tts/", post(synthesize))
        .route("/tts", post(synthesize))
}

/// Create the router for the network self-diagnostic
pub fn diagnostics_router(path: &str) -> Router<Arc<Server>> {
    Router::new().route(path, get(diagnose))
}

/// Handle speech synthesis requests
async fn synthesize(State(server): State<Arc<Server>>, ExtractForm(form): ExtractForm) -> Result<Response> {
    let text = form
        .text
        .as_deref()
        .ok_or_else(|| TtsError::InvalidRequest("text is required".to_owned()))?;

    tracing::debug!("TTS handler called for voice: {:?}", form.voice());

    let outcome = server.synthesize(text, form.voice()).await?;
    tracing::info!(key = %outcome.key, cache_hit = outcome.cache_hit, "TTS request served");
    let cache_status = HeaderValue::from_static(if outcome.cache_hit { "hit" } else { "miss" });

    Ok((
        [(CACHE_STATUS_HEADER, cache_status)],
        Json(SpeechResponse { url: outcome.url }),
    )
        .into_response())
}

/// Handle diagnostics requests
async fn diagnose(State(server): State<Arc<Server>>) -> Response {
    let report = server.diagnose().await;

    let status = if report.healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report)).into_response()
}
