#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod diagnostics;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use diagnostics::*;
pub use health::*;
pub use server::*;
pub use storage::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
pub use tts::*;

/// Top-level wordcast configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Voice catalog and speech synthesis configuration
    pub tts: TtsConfig,
    /// Object storage and metadata catalog configuration
    pub storage: StorageConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
