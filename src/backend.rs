//! Storage collaborator contract

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::Listing;

/// Read-only storage operations the browser core depends on.
///
/// Implementations are injected at construction time; the core never
/// performs any process-wide SDK configuration and never touches
/// credentials. Authentication is entirely the backend's concern, so a
/// permission failure surfaces here like any other error.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// List every entry under `prefix`, exhausting pagination internally.
    /// No cursor is exposed; the result is the complete set for the path.
    async fn list_all(&self, prefix: &str) -> Result<Listing, StorageError>;

    /// Fetch an object's bytes as one transient buffer.
    async fn fetch_object(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Produce a short-lived retrieval URL for an object.
    async fn temporary_url(&self, key: &str, expires_in_secs: u64) -> Result<String, StorageError>;
}
