//! Bulk download outcomes, progress payloads, and policies

use serde::{Deserialize, Serialize};

/// Presigned URL lifetime for object fetches, in seconds.
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadStatus {
    #[serde(rename = "succeeded")]
    Succeeded,
    #[serde(rename = "failed")]
    Failed,
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadStatus::Succeeded => write!(f, "succeeded"),
            DownloadStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one attempted item. Produced exactly once per item; a failed
/// item is never retried within the same batch.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutcome {
    pub key: String,
    pub status: DownloadStatus,
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub(crate) fn succeeded(key: &str) -> Self {
        Self {
            key: key.to_string(),
            status: DownloadStatus::Succeeded,
            error: None,
        }
    }

    pub(crate) fn failed(key: &str, error: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            status: DownloadStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// Progress event payload: emitted once per item, `current` runs 1..=total.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadProgress {
    pub current: usize,
    pub total: usize,
    pub key: String,
}

/// Aggregate result of one bulk download. Ephemeral: surfaced to the user
/// once as a summary, then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct BulkDownloadReport {
    pub outcomes: Vec<DownloadOutcome>,
    pub started_at: i64,
    pub finished_at: i64,
}

impl BulkDownloadReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == DownloadStatus::Succeeded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == DownloadStatus::Failed)
            .count()
    }

    pub fn any_succeeded(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == DownloadStatus::Succeeded)
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Keys of failed items, for a user-driven retry over that subset.
    pub fn failed_keys(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.status == DownloadStatus::Failed)
            .map(|o| o.key.as_str())
            .collect()
    }
}

/// What happens to the selection once a bulk download completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearPolicy {
    /// Clear the selection regardless of the outcome.
    #[serde(rename = "always")]
    Always,
    /// Clear only when at least one item succeeded, so a wholly failed
    /// batch can be retried unchanged.
    #[default]
    #[serde(rename = "on_any_success")]
    OnAnySuccess,
}

impl ClearPolicy {
    pub fn should_clear(&self, report: &BulkDownloadReport) -> bool {
        match self {
            ClearPolicy::Always => true,
            ClearPolicy::OnAnySuccess => report.any_succeeded(),
        }
    }
}
