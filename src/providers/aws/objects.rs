use futures_util::StreamExt;
use reqwest::Client;

use super::presigned::generate_presigned_url;
use super::types::AwsConfig;
use crate::download::DEFAULT_URL_EXPIRY_SECS;
use crate::error::StorageError;

/// Fetch an object's bytes through a fresh presigned URL. The body is
/// collected into one buffer; callers own it for exactly one item's
/// processing.
pub async fn fetch_object(
    http: &Client,
    config: &AwsConfig,
    key: &str,
) -> Result<Vec<u8>, StorageError> {
    let url = generate_presigned_url(config, key, DEFAULT_URL_EXPIRY_SECS).await?;

    let response = http.get(&url).send().await.map_err(|e| {
        StorageError::network(format!("fetch request failed for {}: {}", key, e))
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match status.as_u16() {
            404 => StorageError::NotFound {
                key: key.to_string(),
            },
            401 | 403 => StorageError::AccessDenied {
                key: key.to_string(),
                message: body,
            },
            _ => StorageError::Network {
                message: format!("fetch failed for {}: {} - {}", key, status, body),
                retryable: status.is_server_error(),
            },
        });
    }

    let mut bytes = match response.content_length() {
        Some(len) => Vec::with_capacity(len as usize),
        None => Vec::new(),
    };
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| StorageError::network(format!("failed to read chunk: {}", e)))?;
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
