use async_trait::async_trait;
use reqwest::Client;
use secrecy::SecretString;
use wordcast_config::StorageConfig;

use super::{authorize, error_text, http_client};
use crate::{CatalogError, CatalogIndex, CatalogRecord};

/// Catalog table served by Supabase's PostgREST endpoint
pub struct SupabaseCatalog {
    client: Client,
    table_url: String,
    service_key: SecretString,
}

impl SupabaseCatalog {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: http_client(),
            table_url: format!("{}/rest/v1/{}", config.base_url(), config.catalog.table),
            service_key: config.service_key.clone(),
        }
    }
}

/// PostgREST filter parameters selecting one (text, voice) row
fn lookup_query(text: &str, voice: &str) -> [(&'static str, String); 4] {
    [
        ("select", "word,lang,audio_url".to_owned()),
        ("word", format!("eq.{text}")),
        ("lang", format!("eq.{voice}")),
        ("limit", "1".to_owned()),
    ]
}

#[async_trait]
impl CatalogIndex for SupabaseCatalog {
    async fn find(&self, text: &str, voice: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        let response = authorize(self.client.get(&self.table_url), &self.service_key)
            .query(&lookup_query(text, voice)[..])
            .send()
            .await
            .map_err(|e| CatalogError::Connection(format!("failed to query catalog: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Query {
                status: status.as_u16(),
                message: error_text(response).await,
            });
        }

        let rows: Vec<CatalogRecord> = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: &CatalogRecord) -> Result<(), CatalogError> {
        let response = authorize(self.client.post(&self.table_url), &self.service_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|e| CatalogError::Connection(format!("failed to write catalog: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Write {
                status: status.as_u16(),
                message: error_text(response).await,
            });
        }

        Ok(())
    }
}
