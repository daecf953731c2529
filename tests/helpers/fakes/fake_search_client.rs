use crate::engine::client::{PageStart, SearchClient, SearchHit, SearchPage};
use crate::engine::errors::StorageError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum FakeFailure {
    Unavailable,
    Query(u16),
}

/// In-memory cluster whose documents are generated from their position, in
/// the shape of the `test_index` fixture (`field1 = i`, `field2 = "henry{i}"`).
#[derive(Debug)]
pub struct FakeSearchClient {
    cluster: String,
    counts: Mutex<HashMap<(String, String), u64>>,
    failure: Mutex<Option<FakeFailure>>,
    delay: Option<Duration>,
    closed: AtomicBool,
    count_calls: AtomicUsize,
    searches: Mutex<Vec<(u64, u64)>>,
    cursor_pages: AtomicUsize,
}

impl FakeSearchClient {
    pub fn new(cluster: &str) -> Self {
        Self {
            cluster: cluster.to_string(),
            counts: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            delay: None,
            closed: AtomicBool::new(false),
            count_calls: AtomicUsize::new(0),
            searches: Mutex::new(Vec::new()),
            cursor_pages: AtomicUsize::new(0),
        }
    }

    pub fn with_docs(self, index: &str, doc_type: &str, count: u64) -> Self {
        self.set_docs(index, doc_type, count);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(self, failure: FakeFailure) -> Self {
        *self.failure.lock() = Some(failure);
        self
    }

    /// Changes the indexed population between calls.
    pub fn set_docs(&self, index: &str, doc_type: &str, count: u64) {
        self.counts
            .lock()
            .insert((index.to_string(), doc_type.to_string()), count);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<(u64, u64)> {
        self.searches.lock().clone()
    }

    /// Searches that continued from a cursor instead of an offset.
    pub fn cursor_pages(&self) -> usize {
        self.cursor_pages.load(Ordering::SeqCst)
    }

    async fn check(&self) -> Result<(), StorageError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.is_closed() {
            return Err(StorageError::unavailable(&self.cluster, "client closed"));
        }
        match self.failure.lock().clone() {
            Some(FakeFailure::Unavailable) => {
                Err(StorageError::unavailable(&self.cluster, "connection refused"))
            }
            Some(FakeFailure::Query(status)) => Err(StorageError::UpstreamQuery {
                cluster: self.cluster.clone(),
                status,
                reason: "rejected by fake".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn docs(&self, index: &str, doc_type: &str) -> Result<u64, StorageError> {
        self.counts
            .lock()
            .get(&(index.to_string(), doc_type.to_string()))
            .copied()
            .ok_or_else(|| StorageError::UpstreamQuery {
                cluster: self.cluster.clone(),
                status: 404,
                reason: format!("no such index [{index}/{doc_type}]"),
            })
    }
}

#[async_trait]
impl SearchClient for FakeSearchClient {
    fn cluster_name(&self) -> &str {
        &self.cluster
    }

    async fn count(&self, index: &str, doc_type: &str) -> Result<u64, StorageError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check().await?;
        self.docs(index, doc_type)
    }

    /// Cursors are `[position]` of the last hit, the shape `_doc` sort
    /// values take on a single-shard index.
    async fn search(
        &self,
        index: &str,
        doc_type: &str,
        start: PageStart,
        length: u64,
    ) -> Result<SearchPage, StorageError> {
        self.check().await?;
        let offset = match start {
            PageStart::Offset(offset) => offset,
            PageStart::After(cursor) => {
                self.cursor_pages.fetch_add(1, Ordering::SeqCst);
                cursor
                    .get(0)
                    .and_then(|v| v.as_u64())
                    .map_or(0, |last| last + 1)
            }
        };
        self.searches.lock().push((offset, length));
        let total = self.docs(index, doc_type)?;
        let end = offset.saturating_add(length).min(total);
        let hits: Vec<SearchHit> = (offset..end)
            .map(|i| SearchHit {
                id: i.to_string(),
                doc_type: doc_type.to_string(),
                score: Some(1.0),
                source: json!({
                    "field1": i,
                    "field2": format!("henry{i}"),
                    "field3": format!("{i}. hello world!! elasticsearch on apache tajo!!"),
                }),
            })
            .collect();
        let cursor = (end > offset).then(|| json!([end - 1]));
        Ok(SearchPage { hits, cursor })
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
