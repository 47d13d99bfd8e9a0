use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use secrecy::SecretString;
use wordcast_config::StorageConfig;

use super::{authorize, error_text, http_client};
use crate::{ArtifactStore, CacheKey, StorageError};

/// Supabase Storage bucket
pub struct SupabaseStorage {
    client: Client,
    base_url: String,
    service_key: SecretString,
    bucket: String,
    prefix: String,
    cache_control: String,
}

impl SupabaseStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: http_client(),
            base_url: config.base_url(),
            service_key: config.service_key.clone(),
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
            cache_control: format!("max-age={}", config.cache_control_seconds),
        }
    }

    fn object_url(&self, key: &CacheKey) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            key.object_path(&self.prefix)
        )
    }
}

#[async_trait]
impl ArtifactStore for SupabaseStorage {
    async fn exists(&self, key: &CacheKey) -> Result<bool, StorageError> {
        let response = authorize(self.client.head(self.object_url(key)), &self.service_key)
            .send()
            .await
            .map_err(|e| StorageError::Connection(format!("failed to probe object: {e}")))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StorageError::Probe {
                status: status.as_u16(),
                message: error_text(response).await,
            }),
        }
    }

    async fn upload(&self, key: &CacheKey, audio: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let bytes = audio.len();

        let response = authorize(self.client.post(self.object_url(key)), &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("cache-control", &self.cache_control)
            .header("x-upsert", "true")
            .body(audio)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%key, "storage upload request failed: {e}");
                StorageError::Connection(format!("failed to upload object: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = error_text(response).await;
            tracing::error!(%key, "storage upload rejected ({status}): {message}");

            return Err(StorageError::Upload {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%key, bytes, "uploaded audio object");
        Ok(())
    }

    fn public_url(&self, key: &CacheKey) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            key.object_path(&self.prefix)
        )
    }
}
