use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::Client;

use crate::error::StorageError;

pub struct S3ClientConfig<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
    pub endpoint_url: Option<&'a str>,
    pub force_path_style: bool,
}

/// Build an S3 client from explicit, injected configuration. No global
/// SDK state is consulted; everything comes from the caller.
pub fn create_s3_client(config: &S3ClientConfig<'_>) -> Result<Client, StorageError> {
    if config.access_key_id.is_empty() || config.secret_access_key.is_empty() {
        return Err(StorageError::invalid_config("missing credentials"));
    }
    if config.region.is_empty() {
        return Err(StorageError::invalid_config("missing region"));
    }

    let credentials = Credentials::new(
        config.access_key_id,
        config.secret_access_key,
        None,
        None,
        "storage-browser",
    );

    let mut builder = S3ConfigBuilder::new()
        .credentials_provider(credentials)
        .region(Region::new(config.region.to_string()));

    if let Some(endpoint_url) = config.endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }

    if config.force_path_style {
        builder = builder.force_path_style(true);
    }

    let s3_config = builder.build();
    Ok(Client::from_conf(s3_config))
}
