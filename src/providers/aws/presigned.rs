use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;

use super::types::{create_aws_client, map_sdk_error, AwsConfig};
use crate::error::StorageError;

/// Presign a GET for `key`, valid for `expires_in_secs`. Authorization is
/// baked into the URL; the fetch itself needs no further credentials.
pub async fn generate_presigned_url(
    config: &AwsConfig,
    key: &str,
    expires_in_secs: u64,
) -> Result<String, StorageError> {
    let client = create_aws_client(config)?;

    let presigning_config = PresigningConfig::builder()
        .expires_in(Duration::from_secs(expires_in_secs))
        .build()
        .map_err(|e| StorageError::invalid_config(format!("presigning config: {}", e)))?;

    let presigned_request = client
        .get_object()
        .bucket(&config.bucket)
        .key(key)
        .presigned(presigning_config)
        .await
        .map_err(|e| map_sdk_error(key, e))?;

    Ok(presigned_request.uri().to_string())
}
