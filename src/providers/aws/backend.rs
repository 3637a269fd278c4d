use async_trait::async_trait;
use reqwest::Client;

use super::types::AwsConfig;
use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::types::Listing;

/// Production backend for AWS S3 and S3-compatible endpoints.
///
/// Holds its own HTTP client for presigned fetches; the SDK client is
/// built per call from the injected config, matching how the listing and
/// presigning helpers are used standalone.
pub struct AwsBackend {
    config: AwsConfig,
    http: Client,
}

impl AwsBackend {
    pub fn new(config: AwsConfig) -> Result<Self, StorageError> {
        let http = Client::builder()
            .build()
            .map_err(|e| StorageError::other(format!("failed to build http client: {}", e)))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AwsConfig {
        &self.config
    }
}

#[async_trait]
impl StorageBackend for AwsBackend {
    async fn list_all(&self, prefix: &str) -> Result<Listing, StorageError> {
        super::list::list_path(&self.config, prefix, None).await
    }

    async fn fetch_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        super::objects::fetch_object(&self.http, &self.config, key).await
    }

    async fn temporary_url(&self, key: &str, expires_in_secs: u64) -> Result<String, StorageError> {
        super::presigned::generate_presigned_url(&self.config, key, expires_in_secs).await
    }
}
