use crate::engine::client::ClusterKey;
use crate::engine::errors::StorageError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A single document returned by a paged search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub doc_type: String,
    pub score: Option<f64>,
    pub source: Value,
}

/// Where a page begins.
#[derive(Debug, Clone, PartialEq)]
pub enum PageStart {
    /// Absolute position in index order.
    Offset(u64),
    /// Right after the cursor returned with a previous page.
    After(Value),
}

/// One page of hits plus the cursor that continues after its last hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub cursor: Option<Value>,
}

/// Operations the adapter needs from a search cluster.
#[async_trait]
pub trait SearchClient: Send + Sync + fmt::Debug {
    fn cluster_name(&self) -> &str;

    /// Number of documents currently indexed under `index`/`doc_type`.
    async fn count(&self, index: &str, doc_type: &str) -> Result<u64, StorageError>;

    /// Up to `length` documents in index order, starting at `start`. A page
    /// shorter than `length` means the index has no more documents.
    async fn search(
        &self,
        index: &str,
        doc_type: &str,
        start: PageStart,
        length: u64,
    ) -> Result<SearchPage, StorageError>;

    fn close(&self);
}

/// Opens a client for a cluster. Called at most once per key by the
/// connection registry while a handle for that key is alive.
pub trait Connector: Send + Sync {
    fn connect(&self, key: &ClusterKey) -> Result<Arc<dyn SearchClient>, StorageError>;
}
