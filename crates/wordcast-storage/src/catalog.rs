use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Row mapping a (text, voice) pair to the public URL of its audio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "word")]
    pub text: String,
    #[serde(rename = "lang")]
    pub voice: String,
    pub audio_url: String,
}

/// Metadata store answering "has this pair been synthesized before?"
#[async_trait]
pub trait CatalogIndex: Send + Sync {
    async fn find(&self, text: &str, voice: &str) -> Result<Option<CatalogRecord>, CatalogError>;

    /// Append a record; the catalog is never updated in place
    async fn insert(&self, record: &CatalogRecord) -> Result<(), CatalogError>;
}
