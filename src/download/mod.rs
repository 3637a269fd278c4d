//! Bulk download workflow
//!
//! Iterates the current selection strictly sequentially, one
//! fetch-then-save cycle completing before the next begins, and
//! aggregates per-item outcomes into a single end-of-batch report:
//! - One progress update per item ("item i of n")
//! - Per-item failures are recorded, never escalated; the batch continues
//! - No automatic retry; a retry is a fresh run over the failed subset
//! - Cancellation is checked between items and keeps produced outcomes

mod types;
mod worker;

pub use types::{
    BulkDownloadReport, ClearPolicy, DownloadOutcome, DownloadProgress, DownloadStatus,
    DEFAULT_URL_EXPIRY_SECS,
};
pub use worker::{BulkDownloader, ProgressCallback};
