//! Core data model for bucket listings

use serde::{Deserialize, Serialize};

/// Fallback file name for keys without a usable last segment (e.g. trailing slash).
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";

/// Immutable snapshot of one storage entry at list time.
///
/// Folder rows come back from delimited listings as keys with a trailing
/// slash and no size. A descriptor may be stale relative to the backend by
/// the time it is downloaded; callers get whatever the object is then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub key: String,
    pub size: Option<u64>,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
}

impl ObjectDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
            last_modified: None,
            etag: None,
        }
    }

    /// Suggested local file name: the last `/`-separated segment of the key.
    pub fn file_name(&self) -> &str {
        match self.key.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment,
            _ => DEFAULT_DOWNLOAD_NAME,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.key.ends_with('/')
    }
}

/// Complete listing for one path prefix.
///
/// A fresh listing replaces the prior one wholesale; there is no
/// incremental diffing between listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    pub prefix: String,
    pub entries: Vec<ObjectDescriptor>,
}

impl Listing {
    pub fn new(prefix: impl Into<String>, entries: Vec<ObjectDescriptor>) -> Self {
        Self {
            prefix: prefix.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&ObjectDescriptor> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}
