//! Mock Azure speech endpoint for integration tests
//!
//! Answers `POST /cognitiveservices/v1` with fake MP3 bytes derived from the
//! SSML body, so tests can tell which request produced a stored object.

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing,
};
use tokio_util::sync::CancellationToken;

/// Mock speech engine with request counters and failure switches
pub struct MockAzure {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockAzureState>,
}

#[derive(Default)]
struct MockAzureState {
    request_count: AtomicU32,
    /// Number of requests to fail with 503 before succeeding
    fail_count: AtomicU32,
    /// Answer 200 with an empty body
    silent: AtomicBool,
    /// Delay before answering, in milliseconds
    delay_ms: AtomicU64,
    last_ssml: Mutex<Option<String>>,
}

impl MockAzure {
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockAzureState::default());

        let app = Router::new()
            .route("/cognitiveservices/v1", routing::post(handle_synthesis))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint to configure as `tts.synthesis.endpoint`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Fail the next `n` requests with 503
    pub fn fail_next(&self, n: u32) {
        self.state.fail_count.store(n, Ordering::SeqCst);
    }

    /// Answer successfully but without audio
    pub fn go_silent(&self) {
        self.state.silent.store(true, Ordering::SeqCst);
    }

    pub fn delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), Ordering::SeqCst);
    }

    pub fn last_ssml(&self) -> Option<String> {
        self.state.last_ssml.lock().unwrap().clone()
    }
}

impl Drop for MockAzure {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Fake audio the mock returns for an SSML document
pub fn fake_audio(ssml: &str) -> Vec<u8> {
    let mut audio = b"ID3".to_vec();
    audio.extend_from_slice(ssml.as_bytes());
    audio
}

async fn handle_synthesis(
    State(state): State<Arc<MockAzureState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    let delay_ms = state.delay_ms.load(Ordering::SeqCst);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    if headers.get("ocp-apim-subscription-key").is_none_or(|key| key != "test-key") {
        return (StatusCode::UNAUTHORIZED, Vec::new());
    }

    if headers.get("x-microsoft-outputformat").is_none() {
        return (StatusCode::BAD_REQUEST, b"missing output format".to_vec());
    }

    let remaining = state.fail_count.load(Ordering::SeqCst);
    if remaining > 0 {
        state.fail_count.store(remaining - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, b"throttled".to_vec());
    }

    let ssml = String::from_utf8_lossy(&body).into_owned();
    *state.last_ssml.lock().unwrap() = Some(ssml.clone());

    if state.silent.load(Ordering::SeqCst) {
        return (StatusCode::OK, Vec::new());
    }

    (StatusCode::OK, fake_audio(&ssml))
}
