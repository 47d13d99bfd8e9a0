use std::{sync::OnceLock, time::Duration};

use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue, USER_AGENT},
};

/// HTTP client reused across synthesis requests
///
/// The per-request deadline is enforced by the orchestrator; the client
/// timeout only guards against connections that never finish.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = HeaderMap::new();
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
            headers.insert(
                USER_AGENT,
                HeaderValue::from_static(concat!("wordcast/", env!("CARGO_PKG_VERSION"))),
            );

            Client::builder()
                .timeout(Duration::from_secs(120))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .default_headers(headers)
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!("falling back to default HTTP client: {e}");
                    Client::new()
                })
        })
        .clone()
}
