use serde::Deserialize;

/// Liveness endpoint
///
/// Answers `ok` without touching the speech engine or storage.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Route path; the trailing slash matches what deployed clients poll
    #[serde(default = "default_health_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: enabled_by_default(),
            path: default_health_path(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn enabled_by_default() -> bool {
    true
}

fn default_health_path() -> String {
    "/health/".to_owned()
}
