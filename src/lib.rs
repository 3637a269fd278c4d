//! Headless core for a cloud object-storage file browser.
//!
//! Lists a bucket path, tracks a client-side selection of objects, and
//! bulk-downloads the selection sequentially with per-item outcomes. The
//! storage backend, identity session, and local file-save primitive are
//! injected collaborators behind traits, so the whole workflow runs and
//! tests without any UI or network environment. A production backend for
//! AWS S3 and S3-compatible endpoints lives in [`providers`].

mod backend;
mod error;
mod identity;
mod saver;
mod selection;
mod types;

pub mod browser;
pub mod download;
pub mod providers;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::StorageBackend;
pub use browser::{BrowseError, BrowserView, ListingRequest, ListingResponse};
pub use download::{
    BulkDownloadReport, BulkDownloader, ClearPolicy, DownloadOutcome, DownloadProgress,
    DownloadStatus,
};
pub use error::StorageError;
pub use identity::IdentitySession;
pub use saver::{DiskSaver, FileSaver};
pub use selection::{select_all_state, SelectAllState, SelectionTracker};
pub use types::{Listing, ObjectDescriptor, DEFAULT_DOWNLOAD_NAME};
