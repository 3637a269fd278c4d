//! Browser view: navigation, selection wiring, and download orchestration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::backend::StorageBackend;
use crate::download::{
    BulkDownloadReport, BulkDownloader, ClearPolicy, DownloadProgress,
};
use crate::error::StorageError;
use crate::identity::IdentitySession;
use crate::saver::FileSaver;
use crate::selection::{select_all_state, SelectAllState, SelectionTracker};
use crate::types::{Listing, ObjectDescriptor};

/// User-level errors handled directly by the view, never escalated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrowseError {
    /// Download requested with nothing selected; surfaced as a notice.
    #[error("no objects selected")]
    EmptySelection,

    /// Only one bulk download may run per view instance.
    #[error("a bulk download is already in progress")]
    DownloadInProgress,
}

type SharedProgress = Arc<dyn Fn(DownloadProgress) + Send + Sync>;

/// Clears the busy flag when it goes out of scope, including when the
/// download future is dropped mid-batch, so the view can never be left
/// busy forever.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self { flag: flag.clone() })
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// In-flight listing request issued by [`BrowserView::start_navigation`].
///
/// Fetching is detached from the view so a newer navigation can be
/// started while this one is still on the wire; the view decides at
/// apply time whether the response is still current.
pub struct ListingRequest {
    seq: u64,
    path: String,
    backend: Arc<dyn StorageBackend>,
}

impl ListingRequest {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn fetch(self) -> ListingResponse {
        let result = self.backend.list_all(&self.path).await;
        ListingResponse {
            seq: self.seq,
            path: self.path,
            result,
        }
    }
}

/// Outcome of one listing request, tagged with the request it answers.
pub struct ListingResponse {
    seq: u64,
    path: String,
    result: Result<Listing, StorageError>,
}

/// One view instance over one bucket: the active path, the latest listing,
/// the selection, and the in-flight download state.
///
/// All collaborators are injected at construction. The selection is
/// cleared on every navigation so it can never refer to a key outside the
/// listing currently on screen.
pub struct BrowserView {
    backend: Arc<dyn StorageBackend>,
    saver: Arc<dyn FileSaver>,
    identity: Option<Arc<dyn IdentitySession>>,
    progress: Option<SharedProgress>,
    clear_policy: ClearPolicy,

    path: String,
    listing: Option<Listing>,
    listing_error: Option<String>,
    selection: SelectionTracker,
    downloading: Arc<AtomicBool>,
    request_seq: u64,
}

impl BrowserView {
    pub fn new(backend: Arc<dyn StorageBackend>, saver: Arc<dyn FileSaver>) -> Self {
        Self {
            backend,
            saver,
            identity: None,
            progress: None,
            clear_policy: ClearPolicy::default(),
            path: String::new(),
            listing: None,
            listing_error: None,
            selection: SelectionTracker::new(),
            downloading: Arc::new(AtomicBool::new(false)),
            request_seq: 0,
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentitySession>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_clear_policy(mut self, policy: ClearPolicy) -> Self {
        self.clear_policy = policy;
        self
    }

    /// Per-item progress feed, forwarded to every bulk download this view runs.
    pub fn with_progress(mut self, callback: SharedProgress) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    /// Transient error from the most recent failed listing attempt, if any.
    pub fn listing_error(&self) -> Option<&str> {
        self.listing_error.as_deref()
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading.load(Ordering::SeqCst)
    }

    /// Shared flag set for the duration of one bulk download. A UI holds a
    /// clone to disable the download action while a batch runs; the view
    /// consults it to reject overlapping invocations.
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        self.downloading.clone()
    }

    /// Switch the view to `path` and issue a listing request for it. The
    /// selection is cleared immediately; issuing a newer request
    /// invalidates any response still in flight.
    pub fn start_navigation(&mut self, path: &str) -> ListingRequest {
        self.request_seq += 1;
        self.path = path.to_string();
        // The selection never survives a path change.
        self.selection.clear();
        ListingRequest {
            seq: self.request_seq,
            path: path.to_string(),
            backend: self.backend.clone(),
        }
    }

    /// Apply a fetched listing response. Only the response to the newest
    /// request for the active path may update displayed state; anything
    /// older is dropped on the floor, errors included.
    pub fn apply_listing(&mut self, response: ListingResponse) -> Result<(), StorageError> {
        if response.seq != self.request_seq || response.path != self.path {
            info!("dropping stale listing response for {:?}", response.path);
            return Ok(());
        }

        match response.result {
            Ok(listing) => {
                info!("listed {:?}: {} entries", response.path, listing.len());
                self.listing = Some(listing);
                self.listing_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("listing failed for {:?}: {}", response.path, e);
                // Prior listing stays on screen; only the error state changes.
                self.listing_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Navigate to `path` in one step: issue, fetch, apply. On failure the
    /// previous listing stays visible; retry is a fresh call.
    pub async fn navigate(&mut self, path: &str) -> Result<(), StorageError> {
        let request = self.start_navigation(path);
        let response = request.fetch().await;
        self.apply_listing(response)
    }

    /// Re-fetch the current path. Clears the selection like any other
    /// re-listing, keeping the subset invariant enforced in one place.
    pub async fn refresh(&mut self) -> Result<(), StorageError> {
        let path = self.path.clone();
        self.navigate(&path).await
    }

    pub fn toggle(&mut self, key: &str) -> bool {
        self.selection.toggle(key)
    }

    pub fn select_all_visible(&mut self) {
        if let Some(listing) = &self.listing {
            let keys: Vec<String> = listing.keys().map(str::to_string).collect();
            self.selection.select_all(keys);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(key)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn select_all_state(&self) -> SelectAllState {
        let listed = self.listing.as_ref().map(Listing::len).unwrap_or(0);
        select_all_state(listed, self.selection.len())
    }

    /// Selected entries in listing order, so download progress follows the
    /// on-screen row order rather than selection-toggle order.
    pub fn selected_descriptors(&self) -> Vec<ObjectDescriptor> {
        match &self.listing {
            Some(listing) => listing
                .entries
                .iter()
                .filter(|entry| self.selection.is_selected(&entry.key))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Run a bulk download over the current selection and return the
    /// end-of-batch report for a summary message. An empty selection is a
    /// local notice; the downloader is never invoked for it.
    pub async fn download_selected(&mut self) -> Result<BulkDownloadReport, BrowseError> {
        let guard =
            BusyGuard::acquire(&self.downloading).ok_or(BrowseError::DownloadInProgress)?;

        let selected = self.selected_descriptors();
        if selected.is_empty() {
            return Err(BrowseError::EmptySelection);
        }

        let mut downloader = BulkDownloader::new(self.backend.clone(), self.saver.clone());
        if let Some(progress) = &self.progress {
            let progress = progress.clone();
            downloader = downloader.with_progress(Box::new(move |p| progress(p)));
        }
        let report = downloader.download_all(&selected).await;
        drop(guard);

        if self.clear_policy.should_clear(&report) {
            self.selection.clear();
        }
        Ok(report)
    }

    pub fn display_id(&self) -> Option<&str> {
        self.identity.as_deref().map(IdentitySession::display_id)
    }

    pub async fn sign_out(&self) -> Result<(), String> {
        match &self.identity {
            Some(identity) => identity.sign_out().await,
            None => Ok(()),
        }
    }
}
