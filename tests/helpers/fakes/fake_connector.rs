use crate::engine::client::{ClusterKey, Connector, SearchClient};
use crate::engine::errors::StorageError;
use crate::test_helpers::fakes::FakeSearchClient;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Builder = Box<dyn Fn(&ClusterKey) -> FakeSearchClient + Send + Sync>;

/// Hands out a fresh [`FakeSearchClient`] per connect and remembers each one.
pub struct FakeConnector {
    build: Builder,
    connect_delay: Option<Duration>,
    refusals: AtomicUsize,
    connects: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    clients: Mutex<Vec<Arc<FakeSearchClient>>>,
}

impl FakeConnector {
    pub fn new(build: impl Fn(&ClusterKey) -> FakeSearchClient + Send + Sync + 'static) -> Self {
        Self {
            build: Box::new(build),
            connect_delay: None,
            refusals: AtomicUsize::new(0),
            connects: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            clients: Mutex::new(Vec::new()),
        }
    }

    /// Every cluster holds `count` documents under `test_index/test_type`.
    pub fn with_fixture_docs(count: u64) -> Self {
        Self::new(move |key| {
            FakeSearchClient::new(&key.cluster_name).with_docs("test_index", "test_type", count)
        })
    }

    /// Blocks inside `connect` to widen the window for concurrent acquires.
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub fn refusing(self) -> Self {
        self.refusing_first(usize::MAX)
    }

    /// Refuses the first `n` connects, then behaves normally.
    pub fn refusing_first(self, n: usize) -> Self {
        self.refusals.store(n, Ordering::SeqCst);
        self
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Highest number of `connect` calls that were running at the same time.
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn clients(&self) -> Vec<Arc<FakeSearchClient>> {
        self.clients.lock().clone()
    }

    pub fn last_client(&self) -> Option<Arc<FakeSearchClient>> {
        self.clients.lock().last().cloned()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, key: &ClusterKey) -> Result<Arc<dyn SearchClient>, StorageError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        if let Some(delay) = self.connect_delay {
            std::thread::sleep(delay);
        }
        let refused = self
            .refusals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let result: Result<Arc<dyn SearchClient>, StorageError> = if refused {
            Err(StorageError::unavailable(&key.cluster_name, "connect refused"))
        } else {
            let client = Arc::new((self.build)(key));
            self.clients.lock().push(Arc::clone(&client));
            Ok(client)
        };
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
