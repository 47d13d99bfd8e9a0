//! Supabase-backed storage bucket and PostgREST catalog

mod catalog;
mod storage;

use std::{sync::OnceLock, time::Duration};

use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

pub use catalog::SupabaseCatalog;
pub use storage::SupabaseStorage;

/// HTTP client shared by the storage and catalog clients
fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_nodelay(true)
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!("falling back to default HTTP client: {e}");
                    Client::new()
                })
        })
        .clone()
}

/// Attach the service key as both `apikey` and bearer token
fn authorize(request: RequestBuilder, service_key: &SecretString) -> RequestBuilder {
    let key = service_key.expose_secret();
    request.header("apikey", key).bearer_auth(key)
}

/// Read an error body without failing on unreadable responses
async fn error_text(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_else(|_| "Unknown error".to_string())
}
