use log::info;

use super::types::{create_aws_client, descriptor_from_object, map_sdk_error, AwsConfig};
use crate::error::StorageError;
use crate::types::{Listing, ObjectDescriptor};

/// List every entry directly under `prefix`, exhausting pagination before
/// returning. Folder rows come back as trailing-slash descriptors derived
/// from the response's common prefixes. The optional callback receives
/// (pages fetched, entries so far) after each page.
pub async fn list_path(
    config: &AwsConfig,
    prefix: &str,
    progress_callback: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
) -> Result<Listing, StorageError> {
    let client = create_aws_client(config)?;
    let mut objects: Vec<ObjectDescriptor> = Vec::new();
    let mut folders: Vec<ObjectDescriptor> = Vec::new();
    let mut continuation_token: Option<String> = None;
    let mut page_count = 0usize;

    loop {
        let mut request = client
            .list_objects_v2()
            .bucket(&config.bucket)
            .delimiter("/")
            .max_keys(1000);

        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }
        if let Some(token) = &continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_sdk_error(prefix, e))?;
        page_count += 1;

        objects.extend(response.contents().iter().filter_map(|obj| {
            let descriptor = descriptor_from_object(obj)?;
            // The prefix placeholder lists itself; folder rows come from
            // common prefixes instead.
            if descriptor.key == prefix {
                return None;
            }
            Some(descriptor)
        }));

        for common in response.common_prefixes() {
            if let Some(folder_key) = common.prefix() {
                if !folders.iter().any(|f| f.key == folder_key) {
                    folders.push(ObjectDescriptor::new(folder_key));
                }
            }
        }

        if let Some(ref cb) = progress_callback {
            cb(page_count, objects.len() + folders.len());
        }

        if !response.is_truncated().unwrap_or(false) {
            break;
        }

        continuation_token = response.next_continuation_token().map(|s| s.to_string());
    }

    info!(
        "listed s3://{}/{}: {} objects, {} folders over {} pages",
        config.bucket,
        prefix,
        objects.len(),
        folders.len(),
        page_count
    );

    let mut entries = folders;
    entries.append(&mut objects);
    Ok(Listing::new(prefix, entries))
}
