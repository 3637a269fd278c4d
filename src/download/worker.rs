//! Bulk download worker - sequential fetch-then-save over the selection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};

use crate::backend::StorageBackend;
use crate::saver::FileSaver;
use crate::types::ObjectDescriptor;

use super::types::{BulkDownloadReport, DownloadOutcome, DownloadProgress};

pub type ProgressCallback = Box<dyn Fn(DownloadProgress) + Send + Sync>;

/// Runs one bulk download: items are processed strictly sequentially so
/// that at most one object's bytes are held in memory at a time and the
/// progress feed stays user-legible ("item i of n", one update per item).
pub struct BulkDownloader {
    backend: Arc<dyn StorageBackend>,
    saver: Arc<dyn FileSaver>,
    progress: Option<ProgressCallback>,
    cancelled: Arc<AtomicBool>,
}

impl BulkDownloader {
    pub fn new(backend: Arc<dyn StorageBackend>, saver: Arc<dyn FileSaver>) -> Self {
        Self {
            backend,
            saver,
            progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Shared flag checked between items; setting it stops the batch
    /// before the next item while keeping already-produced outcomes.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Process every selected item, one fetch-then-save cycle at a time.
    /// A per-item failure is recorded and the loop moves on; nothing short
    /// of cancellation stops delivery of the rest of the batch.
    pub async fn download_all(&self, selected: &[ObjectDescriptor]) -> BulkDownloadReport {
        let started_at = Utc::now().timestamp();
        let total = selected.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, item) in selected.iter().enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                warn!(
                    "bulk download cancelled after {} of {} items",
                    index, total
                );
                break;
            }

            self.emit_progress(DownloadProgress {
                current: index + 1,
                total,
                key: item.key.clone(),
            });

            outcomes.push(self.download_one(item).await);
        }

        let report = BulkDownloadReport {
            outcomes,
            started_at,
            finished_at: Utc::now().timestamp(),
        };
        info!(
            "bulk download finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    async fn download_one(&self, item: &ObjectDescriptor) -> DownloadOutcome {
        let bytes = match self.backend.fetch_object(&item.key).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("fetch failed for {}: {}", item.key, e);
                return DownloadOutcome::failed(&item.key, e.to_string());
            }
        };

        let result = self.saver.save(item.file_name(), &bytes).await;
        // Release the buffer before the next item starts.
        drop(bytes);

        match result {
            Ok(()) => {
                info!("downloaded {}", item.key);
                DownloadOutcome::succeeded(&item.key)
            }
            Err(e) => {
                warn!("save failed for {}: {}", item.key, e);
                DownloadOutcome::failed(&item.key, e)
            }
        }
    }

    fn emit_progress(&self, progress: DownloadProgress) {
        if let Some(callback) = &self.progress {
            callback(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Mutex};

    use super::BulkDownloader;
    use crate::download::DownloadStatus;
    use crate::testing::{MemorySaver, MockBackend};
    use crate::types::ObjectDescriptor;

    fn descriptors(keys: &[&str]) -> Vec<ObjectDescriptor> {
        keys.iter().copied().map(ObjectDescriptor::new).collect()
    }

    #[tokio::test]
    async fn failures_do_not_abort_the_batch() {
        let backend = Arc::new(
            MockBackend::new()
                .with_object("a.txt", b"aaa")
                .with_object("d.txt", b"ddd")
                .fail_fetch("c.txt"),
        );
        let saver = Arc::new(MemorySaver::new());
        let downloader = BulkDownloader::new(backend.clone(), saver.clone());

        let report = downloader
            .download_all(&descriptors(&["a.txt", "c.txt", "d.txt"]))
            .await;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        // Every item got exactly one fetch attempt, failure or not.
        assert_eq!(backend.fetch_calls(), vec!["a.txt", "c.txt", "d.txt"]);
        assert_eq!(saver.saved_names(), vec!["a.txt", "d.txt"]);
        assert_eq!(report.failed_keys(), vec!["c.txt"]);
    }

    #[tokio::test]
    async fn empty_batch_never_touches_the_backend() {
        let backend = Arc::new(MockBackend::new());
        let saver = Arc::new(MemorySaver::new());
        let downloader = BulkDownloader::new(backend.clone(), saver.clone());

        let report = downloader.download_all(&[]).await;

        assert_eq!(report.total(), 0);
        assert!(backend.fetch_calls().is_empty());
        assert!(saver.saved_names().is_empty());
    }

    #[tokio::test]
    async fn progress_is_one_update_per_item_and_monotone() {
        let backend = Arc::new(
            MockBackend::new()
                .with_object("a.txt", b"a")
                .with_object("b.txt", b"b")
                .fail_fetch("c.txt"),
        );
        let saver = Arc::new(MemorySaver::new());

        let seen: Arc<Mutex<Vec<(usize, usize, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let downloader = BulkDownloader::new(backend, saver).with_progress(Box::new(move |p| {
            sink.lock().unwrap().push((p.current, p.total, p.key));
        }));

        downloader
            .download_all(&descriptors(&["a.txt", "c.txt", "b.txt"]))
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (1, 3, "a.txt".to_string()),
                (2, 3, "c.txt".to_string()),
                (3, 3, "b.txt".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn save_failure_is_a_per_item_outcome() {
        let backend = Arc::new(MockBackend::new().with_object("a.txt", b"a"));
        let saver = Arc::new(MemorySaver::new().fail_name("a.txt"));
        let downloader = BulkDownloader::new(backend, saver);

        let report = downloader.download_all(&descriptors(&["a.txt"])).await;

        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcomes[0].status, DownloadStatus::Failed);
        assert!(report.outcomes[0].error.is_some());
    }

    #[tokio::test]
    async fn folder_key_saves_under_the_fallback_name() {
        let backend = Arc::new(MockBackend::new().with_object("b/", b""));
        let saver = Arc::new(MemorySaver::new());
        let downloader = BulkDownloader::new(backend, saver.clone());

        let report = downloader.download_all(&descriptors(&["b/"])).await;

        assert_eq!(report.succeeded(), 1);
        assert_eq!(saver.saved_names(), vec!["download"]);
    }

    #[tokio::test]
    async fn cancellation_between_items_keeps_produced_outcomes() {
        let backend = Arc::new(
            MockBackend::new()
                .with_object("a.txt", b"a")
                .with_object("b.txt", b"b"),
        );
        let saver = Arc::new(MemorySaver::new());
        let downloader = BulkDownloader::new(backend.clone(), saver);

        let cancel = downloader.cancel_flag();
        let downloader = downloader.with_progress(Box::new(move |p| {
            if p.current == 1 {
                cancel.store(true, Ordering::SeqCst);
            }
        }));

        let report = downloader
            .download_all(&descriptors(&["a.txt", "b.txt"]))
            .await;

        // Item one completed before the flag was observed; item two never ran.
        assert_eq!(report.total(), 1);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(backend.fetch_calls(), vec!["a.txt"]);
    }
}
