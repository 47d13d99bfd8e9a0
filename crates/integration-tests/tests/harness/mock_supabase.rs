//! Mock Supabase project for integration tests
//!
//! Serves the storage object API and a PostgREST table with the subset of
//! filters the catalog client uses.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// The only bucket the mock project has
pub const BUCKET: &str = "tts";

/// A stored object with the headers it was uploaded with
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub upsert: bool,
}

/// Catalog row in the table's column names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub word: String,
    pub lang: String,
    pub audio_url: String,
}

pub struct MockSupabase {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSupabaseState>,
}

#[derive(Default)]
struct MockSupabaseState {
    objects: Mutex<HashMap<String, StoredObject>>,
    rows: Mutex<Vec<Row>>,
    upload_count: AtomicU32,
    lookup_count: AtomicU32,
    insert_count: AtomicU32,
    fail_uploads: AtomicBool,
    fail_lookups: AtomicBool,
    fail_inserts: AtomicBool,
}

impl MockSupabase {
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockSupabaseState::default());

        let app = Router::new()
            .route(
                "/storage/v1/object/{*path}",
                routing::post(handle_upload).get(handle_download),
            )
            .route("/rest/v1/{table}", routing::get(handle_select).post(handle_insert))
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

    /// Project URL to configure as `storage.url`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Object stored under `bucket/path`
    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.state.objects.lock().unwrap().get(path).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.state.objects.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.state.rows.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> u32 {
        self.state.upload_count.load(Ordering::SeqCst)
    }

    pub fn lookup_count(&self) -> u32 {
        self.state.lookup_count.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> u32 {
        self.state.insert_count.load(Ordering::SeqCst)
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.state.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.state.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.state.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

impl Drop for MockSupabase {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());

    api_key == Some("service-key") && bearer == Some("Bearer service-key")
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

async fn handle_upload(
    State(state): State<Arc<MockSupabaseState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.upload_count.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid key").into_response();
    }

    if state.fail_uploads.load(Ordering::SeqCst) {
        return (StatusCode::FORBIDDEN, r#"{"message":"new row violates row-level security policy"}"#).into_response();
    }

    let object = StoredObject {
        body: body.to_vec(),
        content_type: header(&headers, "content-type"),
        cache_control: header(&headers, "cache-control"),
        upsert: header(&headers, "x-upsert").as_deref() == Some("true"),
    };

    let mut objects = state.objects.lock().unwrap();
    if objects.contains_key(&path) && !object.upsert {
        return (StatusCode::CONFLICT, "The resource already exists").into_response();
    }
    objects.insert(path.clone(), object);

    Json(serde_json::json!({ "Key": path })).into_response()
}

/// Serves both public reads and authenticated probes; HEAD is derived from GET
///
/// Unknown buckets answer 400 and missing objects 404.
async fn handle_download(
    State(state): State<Arc<MockSupabaseState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    let path = match path.strip_prefix("public/") {
        Some(public) => public.to_owned(),
        None if authorized(&headers) => path,
        None => return StatusCode::UNAUTHORIZED.into_response(),
    };

    if !path.starts_with(&format!("{BUCKET}/")) {
        return (StatusCode::BAD_REQUEST, r#"{"error":"Bucket not found"}"#).into_response();
    }

    match state.objects.lock().unwrap().get(&path) {
        Some(object) => (StatusCode::OK, object.body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"error":"not_found"}"#).into_response(),
    }
}

async fn handle_select(
    State(state): State<Arc<MockSupabaseState>>,
    Path(_table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.lookup_count.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if state.fail_lookups.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response();
    }

    let filter = |column: &str| params.get(column).and_then(|v| v.strip_prefix("eq.")).map(str::to_owned);
    let (Some(word), Some(lang)) = (filter("word"), filter("lang")) else {
        return (StatusCode::BAD_REQUEST, "missing filters").into_response();
    };

    let rows: Vec<Row> = state
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|row| row.word == word && row.lang == lang)
        .take(1)
        .cloned()
        .collect();

    Json(rows).into_response()
}

async fn handle_insert(
    State(state): State<Arc<MockSupabaseState>>,
    Path(_table): Path<String>,
    headers: HeaderMap,
    Json(row): Json<Row>,
) -> Response {
    state.insert_count.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if state.fail_inserts.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "disk full").into_response();
    }

    state.rows.lock().unwrap().push(row);
    StatusCode::CREATED.into_response()
}
