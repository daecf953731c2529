use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while resolving table metadata or planning fragments.
///
/// Planning is all-or-nothing: any of these aborts the split request for the
/// affected table and no fragments are returned.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid table configuration for '{table}': option '{key}' {reason}")]
    Configuration {
        table: String,
        key: String,
        reason: String,
    },

    #[error("Search cluster '{cluster}' unavailable: {reason}")]
    UpstreamUnavailable { cluster: String, reason: String },

    #[error("Search cluster '{cluster}' rejected request (status {status}): {reason}")]
    UpstreamQuery {
        cluster: String,
        status: u16,
        reason: String,
    },

    #[error("Invalid fetch size {fetch_size} for table '{table}'")]
    InvalidFetchSize { table: String, fetch_size: u64 },

    #[error("Invalid row count for table '{table}': {reason}")]
    InvalidRowCount { table: String, reason: String },
}

impl StorageError {
    pub fn configuration(
        table: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        StorageError::Configuration {
            table: table.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(cluster: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::UpstreamUnavailable {
            cluster: cluster.into(),
            reason: reason.into(),
        }
    }

    /// Only transient connectivity failures are worth retrying; the adapter
    /// itself never retries, it leaves that to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::UpstreamUnavailable { .. })
    }

    pub fn log_error(&self) {
        match self {
            StorageError::Configuration { table, key, reason } => {
                error!(table = %table, key = %key, "Table configuration rejected: {}", reason);
            }
            StorageError::UpstreamUnavailable { cluster, reason } => {
                error!(cluster = %cluster, "Search cluster unavailable: {}", reason);
                debug!("Upstream unavailable details: {:?}", self);
            }
            StorageError::UpstreamQuery {
                cluster,
                status,
                reason,
            } => {
                error!(cluster = %cluster, status, "Search cluster rejected request");
                debug!("Upstream query error body: {}", reason);
            }
            StorageError::InvalidFetchSize { table, fetch_size } => {
                error!(table = %table, fetch_size, "Invalid fetch size reached the planner");
            }
            StorageError::InvalidRowCount { table, reason } => {
                error!(table = %table, "Row count rejected: {}", reason);
            }
        }
    }
}
