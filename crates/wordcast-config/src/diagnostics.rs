use std::time::Duration;

use serde::Deserialize;

/// Network self-diagnostic endpoint
///
/// Probes DNS, TCP reachability and an end-to-end synthesis against the
/// configured provider. Disabled unless explicitly turned on because the
/// smoke synthesis consumes provider quota.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
    /// Phrase synthesized by the smoke test
    #[serde(default = "default_probe_text")]
    pub probe_text: String,
    /// Deadline applied to each probe stage
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DiagnosticsConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_path(),
            probe_text: default_probe_text(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_path() -> String {
    "/diagnostics".to_owned()
}

fn default_probe_text() -> String {
    "hello".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    5
}
