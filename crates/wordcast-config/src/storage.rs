use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Supabase project backing both the audio bucket and the catalog table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Project URL (e.g. `https://xyz.supabase.co`)
    pub url: Url,
    /// Service role key, sent as both `apikey` and bearer token
    pub service_key: SecretString,
    /// Storage bucket holding audio objects
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Folder inside the bucket
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// `Cache-Control` max-age applied to uploaded objects
    #[serde(default = "default_cache_control_seconds")]
    pub cache_control_seconds: u64,
    /// Metadata catalog
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl StorageConfig {
    /// Project URL without a trailing slash
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_owned()
    }
}

/// Metadata table mapping (text, voice) to audio URLs
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Table name exposed through PostgREST
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { table: default_table() }
    }
}

fn default_bucket() -> String {
    "tts".to_owned()
}

fn default_prefix() -> String {
    "tts".to_owned()
}

#[allow(clippy::missing_const_for_fn)]
fn default_cache_control_seconds() -> u64 {
    3600
}

fn default_table() -> String {
    "tts_cache".to_owned()
}
