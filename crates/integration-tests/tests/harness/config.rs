//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use secrecy::SecretString;
use wordcast_config::{
    CatalogConfig, Config, CorsConfig, DEFAULT_VOICE, DEFAULT_VOICES, DiagnosticsConfig, ServerConfig, StorageConfig,
    SynthesisConfig, SynthesisProviderType, TtsConfig,
};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Point synthesis at `azure_url` and storage at `supabase_url`
    pub fn new(azure_url: &str, supabase_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                tts: TtsConfig {
                    default_voice: DEFAULT_VOICE.to_owned(),
                    voices: DEFAULT_VOICES.iter().map(ToString::to_string).collect(),
                    scratch_dir: None,
                    synthesis: SynthesisConfig {
                        provider_type: SynthesisProviderType::Azure,
                        region: None,
                        endpoint: Some(azure_url.parse().expect("valid URL")),
                        api_key: SecretString::from("test-key"),
                        timeout_seconds: 5,
                        max_retries: 0,
                        retry_backoff_ms: 10,
                    },
                },
                storage: StorageConfig {
                    url: supabase_url.parse().expect("valid URL"),
                    service_key: SecretString::from("service-key"),
                    bucket: "tts".to_owned(),
                    prefix: "tts".to_owned(),
                    cache_control_seconds: 3600,
                    catalog: CatalogConfig::default(),
                },
                telemetry: None,
            },
        }
    }

    /// Create spool files in `dir`
    pub fn with_scratch_dir(mut self, dir: &Path) -> Self {
        self.config.tts.scratch_dir = Some(dir.to_path_buf());
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.config.tts.synthesis.max_retries = max_retries;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.tts.synthesis.timeout_seconds = seconds;
        self
    }

    /// Enable the diagnostics endpoint at its default path
    pub fn with_diagnostics(mut self) -> Self {
        self.config.server.diagnostics = DiagnosticsConfig {
            enabled: true,
            timeout_seconds: 2,
            ..DiagnosticsConfig::default()
        };
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config, validated the same way a loaded file is
    pub fn build(self) -> Config {
        self.config.validate().expect("valid test configuration");
        self.config
    }
}
