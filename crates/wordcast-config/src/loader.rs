use std::{collections::HashSet, path::Path};

use secrecy::ExposeSecret;

use crate::{AnyOrArray, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_voices()?;
        self.validate_synthesis()?;
        self.validate_storage()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_voices(&self) -> anyhow::Result<()> {
        let voices = &self.tts.voices;

        if voices.is_empty() {
            anyhow::bail!("tts.voices must list at least one voice");
        }

        // Identifiers feed the cache key, which separates voice and text with NUL
        if let Some(invalid) = voices.iter().find(|voice| !is_voice_identifier(voice)) {
            anyhow::bail!("tts.voices contains an invalid identifier: '{invalid}'");
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = voices.iter().find(|voice| !seen.insert(voice.as_str())) {
            anyhow::bail!("tts.voices lists '{duplicate}' more than once");
        }

        if !voices.contains(&self.tts.default_voice) {
            anyhow::bail!(
                "tts.default_voice '{}' is not one of tts.voices",
                self.tts.default_voice
            );
        }

        Ok(())
    }

    fn validate_synthesis(&self) -> anyhow::Result<()> {
        let synthesis = &self.tts.synthesis;

        if synthesis.base_url().is_none() {
            anyhow::bail!("tts.synthesis requires either `region` or `endpoint`");
        }

        if synthesis.api_key.expose_secret().is_empty() {
            anyhow::bail!("tts.synthesis.api_key must not be empty");
        }

        if synthesis.timeout_seconds == 0 {
            anyhow::bail!("tts.synthesis.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_storage(&self) -> anyhow::Result<()> {
        let storage = &self.storage;

        if !matches!(storage.url.scheme(), "http" | "https") {
            anyhow::bail!("storage.url must use http or https, got '{}'", storage.url.scheme());
        }

        if storage.service_key.expose_secret().is_empty() {
            anyhow::bail!("storage.service_key must not be empty");
        }

        if storage.bucket.is_empty() || storage.bucket.contains('/') {
            anyhow::bail!("storage.bucket must be a single non-empty path segment");
        }

        if storage.catalog.table.is_empty() {
            anyhow::bail!("storage.catalog.table must not be empty");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let server = &self.server;

        if server.health.enabled {
            check_route("server.health.path", &server.health.path)?;
        }

        if server.diagnostics.enabled {
            check_route("server.diagnostics.path", &server.diagnostics.path)?;

            if server.health.enabled && server.health.path == server.diagnostics.path {
                anyhow::bail!("server.diagnostics.path must differ from server.health.path");
            }

            if server.diagnostics.probe_text.trim().is_empty() {
                anyhow::bail!("server.diagnostics.probe_text must not be empty");
            }
        }

        // Browsers refuse credentialed responses carrying wildcard CORS headers
        if let Some(cors) = &server.cors
            && cors.credentials
            && [&cors.origins, &cors.methods, &cors.headers].contains(&&AnyOrArray::Any)
        {
            anyhow::bail!("server.cors.credentials requires explicit origins, methods and headers");
        }

        Ok(())
    }
}

/// Paths served regardless of configuration
const RESERVED_ROUTES: [&str; 3] = ["/", "/tts", "/tts/"];

fn check_route(field: &str, path: &str) -> anyhow::Result<()> {
    if !path.starts_with('/') {
        anyhow::bail!("{field} must start with '/'");
    }

    if RESERVED_ROUTES.contains(&path) {
        anyhow::bail!("{field} '{path}' collides with a built-in route");
    }

    Ok(())
}

fn is_voice_identifier(voice: &str) -> bool {
    !voice.is_empty()
        && voice
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
