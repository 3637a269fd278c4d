use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::Client;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::providers::s3_client::{create_s3_client, S3ClientConfig};
use crate::types::ObjectDescriptor;

/// Connection settings for one bucket. Injected wherever a backend is
/// constructed; nothing is read from ambient environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub endpoint_scheme: Option<String>,
    pub endpoint_host: Option<String>,
    pub force_path_style: bool,
}

fn build_endpoint_url(config: &AwsConfig) -> Option<String> {
    let host = config.endpoint_host.as_ref()?.trim();
    if host.is_empty() {
        return None;
    }
    let scheme = config.endpoint_scheme.as_deref().unwrap_or("https");
    Some(format!("{}://{}", scheme, host))
}

pub(crate) fn create_aws_client(config: &AwsConfig) -> Result<Client, StorageError> {
    let endpoint_url = build_endpoint_url(config);
    create_s3_client(&S3ClientConfig {
        access_key_id: &config.access_key_id,
        secret_access_key: &config.secret_access_key,
        region: &config.region,
        endpoint_url: endpoint_url.as_deref(),
        force_path_style: config.force_path_style,
    })
}

/// Map one SDK listing row into a descriptor. Rows without a key are
/// dropped; negative sizes (which the SDK permits) read as unknown.
pub(crate) fn descriptor_from_object(obj: &aws_sdk_s3::types::Object) -> Option<ObjectDescriptor> {
    let key = obj.key()?.to_string();
    Some(ObjectDescriptor {
        key,
        size: obj.size().and_then(|s| u64::try_from(s).ok()),
        last_modified: obj.last_modified().map(|dt| dt.to_string()),
        etag: obj.e_tag().map(|s| s.to_string()),
    })
}

/// Classify an SDK failure into the crate taxonomy by service error code.
pub(crate) fn map_sdk_error<E>(key: &str, err: SdkError<E>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().map(str::to_string);
    let message = format!("{}", DisplayErrorContext(&err));
    match code.as_deref() {
        Some("NoSuchKey") | Some("NoSuchBucket") | Some("NotFound") => StorageError::NotFound {
            key: key.to_string(),
        },
        Some("AccessDenied") => StorageError::AccessDenied {
            key: key.to_string(),
            message,
        },
        _ => StorageError::Network {
            message,
            retryable: true,
        },
    }
}
