use async_trait::async_trait;

use crate::{CacheKey, StorageError};

/// Content type of every stored clip
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Object storage holding synthesized audio
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Whether an object already exists under `key`
    async fn exists(&self, key: &CacheKey) -> Result<bool, StorageError>;

    /// Store `audio` under `key`
    ///
    /// Writes are upserts, so two requests racing on the same key leave a
    /// single object behind.
    async fn upload(&self, key: &CacheKey, audio: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Public URL of the object under `key`
    ///
    /// Computed locally; valid whether or not the object exists yet.
    fn public_url(&self, key: &CacheKey) -> String;
}
