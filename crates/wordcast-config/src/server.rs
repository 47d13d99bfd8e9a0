use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, diagnostics::DiagnosticsConfig, health::HealthConfig};

/// HTTP listener and auxiliary routes
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Defaults to `0.0.0.0:8000`
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// CORS is off unless configured
    #[serde(default)]
    pub cors: Option<CorsConfig>,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}
