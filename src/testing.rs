//! In-memory fakes shared by the workflow tests

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::StorageBackend;
use crate::error::StorageError;
use crate::saver::FileSaver;
use crate::types::{Listing, ObjectDescriptor};

/// Scripted backend: fixed listings per prefix, fixed object bodies,
/// opt-in failures, and call recording for assertions.
#[derive(Default)]
pub(crate) struct MockBackend {
    listings: Mutex<HashMap<String, Vec<ObjectDescriptor>>>,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    failing_fetches: Mutex<HashSet<String>>,
    hanging_fetches: Mutex<HashSet<String>>,
    failing_listings: Mutex<HashSet<String>>,
    fetch_log: Mutex<Vec<String>>,
    list_log: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, prefix: &str, entries: Vec<ObjectDescriptor>) -> Self {
        self.listings
            .lock()
            .unwrap()
            .insert(prefix.to_string(), entries);
        self
    }

    pub fn with_object(self, key: &str, bytes: &[u8]) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        self
    }

    pub fn fail_fetch(self, key: &str) -> Self {
        self.failing_fetches.lock().unwrap().insert(key.to_string());
        self
    }

    /// Make `fetch_object` for `key` pend forever, like a stalled transfer.
    pub fn hang_fetch(self, key: &str) -> Self {
        self.hanging_fetches.lock().unwrap().insert(key.to_string());
        self
    }

    pub fn fail_listing(self, prefix: &str) -> Self {
        self.failing_listings
            .lock()
            .unwrap()
            .insert(prefix.to_string());
        self
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_log.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    async fn list_all(&self, prefix: &str) -> Result<Listing, StorageError> {
        self.list_log.lock().unwrap().push(prefix.to_string());
        if self.failing_listings.lock().unwrap().contains(prefix) {
            return Err(StorageError::network("listing unavailable"));
        }
        let entries = self
            .listings
            .lock()
            .unwrap()
            .get(prefix)
            .cloned()
            .unwrap_or_default();
        Ok(Listing::new(prefix, entries))
    }

    async fn fetch_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.fetch_log.lock().unwrap().push(key.to_string());
        let hang = self.hanging_fetches.lock().unwrap().contains(key);
        if hang {
            std::future::pending::<()>().await;
        }
        if self.failing_fetches.lock().unwrap().contains(key) {
            return Err(StorageError::network(format!("fetch failed for {}", key)));
        }
        match self.objects.lock().unwrap().get(key) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    async fn temporary_url(&self, key: &str, expires_in_secs: u64) -> Result<String, StorageError> {
        Ok(format!("mock://{}?expires={}", key, expires_in_secs))
    }
}

/// Saver that records (name, bytes) pairs instead of touching disk.
#[derive(Default)]
pub(crate) struct MemorySaver {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    failing_names: Mutex<HashSet<String>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_name(self, file_name: &str) -> Self {
        self.failing_names
            .lock()
            .unwrap()
            .insert(file_name.to_string());
        self
    }

    pub fn saved_names(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl FileSaver for MemorySaver {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        if self.failing_names.lock().unwrap().contains(file_name) {
            return Err(format!("save rejected for {}", file_name));
        }
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}
