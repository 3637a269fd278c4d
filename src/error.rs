//! Error taxonomy for storage operations

use thiserror::Error;

/// Errors surfaced by a [`StorageBackend`](crate::StorageBackend).
///
/// Listing failures are presented as a single transient error state to the
/// view; per-object failures during a bulk download are recorded per item
/// and never abort the batch.
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("access denied for {key}: {message}")]
    AccessDenied { key: String, message: String },

    #[error("network error: {message}")]
    Network { message: String, retryable: bool },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl StorageError {
    pub fn network(message: impl Into<String>) -> Self {
        StorageError::Network {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        StorageError::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        StorageError::Other {
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Network { retryable: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::StorageError;

    #[test]
    fn only_retryable_network_errors_are_retryable() {
        assert!(StorageError::network("connection reset").is_retryable());
        assert!(!StorageError::Network {
            message: "bad request".to_string(),
            retryable: false,
        }
        .is_retryable());
        assert!(!StorageError::NotFound { key: "a.txt".to_string() }.is_retryable());
        assert!(!StorageError::invalid_config("missing region").is_retryable());
    }
}
