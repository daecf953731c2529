use crate::engine::client::{ClusterKey, Connector, NodeAddress, SearchClient};
use crate::engine::errors::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// A counted reference to a shared cluster client. Must be handed back through
/// [`ConnectionRegistry::release`]; dropping it without releasing leaks the
/// reference and keeps the connection open.
#[derive(Debug)]
pub struct ClientHandle {
    key: ClusterKey,
    client: Arc<dyn SearchClient>,
}

impl ClientHandle {
    pub fn client(&self) -> &Arc<dyn SearchClient> {
        &self.client
    }
}

#[derive(Debug)]
struct Entry {
    client: Arc<dyn SearchClient>,
    refs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub created: u64,
    pub shared: u64,
    pub closed: u64,
    pub live: usize,
}

/// Keyed, reference-counted cluster clients.
pub struct ConnectionRegistry {
    connector: Arc<dyn Connector>,
    entries: Mutex<HashMap<ClusterKey, Entry>>,
    inflight: Mutex<HashMap<ClusterKey, Arc<Mutex<()>>>>,
    created: AtomicU64,
    shared: AtomicU64,
    closed: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
            created: AtomicU64::new(0),
            shared: AtomicU64::new(0),
            closed: AtomicU64::new(0),
        }
    }

    pub fn acquire(
        &self,
        cluster_name: &str,
        nodes: &[NodeAddress],
    ) -> Result<ClientHandle, StorageError> {
        let key = ClusterKey::new(cluster_name, nodes.to_vec());

        loop {
            if let Some(handle) = self.share_existing(&key) {
                return Ok(handle);
            }

            // Singleflight: one creator per key, everyone else waits then shares
            let slot = {
                let mut map = self.inflight.lock();
                map.entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .clone()
            };
            let _creator_guard = slot.lock();

            // The previous owner finished (or failed) while we waited on its
            // slot; start over against the current state.
            if !self.owns_slot(&key, &slot) {
                continue;
            }

            if let Some(handle) = self.share_existing(&key) {
                self.inflight.lock().remove(&key);
                return Ok(handle);
            }

            // The entry must be visible before the slot goes away, or a
            // newcomer could open a second client.
            let created = self
                .connector
                .connect(&key)
                .map(|client| self.install(key.clone(), client));
            self.inflight.lock().remove(&key);
            return created;
        }
    }

    /// Drops one reference; the client is closed once nobody holds it.
    pub fn release(&self, handle: ClientHandle) {
        let ClientHandle { key, client } = handle;
        let to_close = {
            let mut entries = self.entries.lock();
            let remaining = match entries.get_mut(&key) {
                Some(entry) if Arc::ptr_eq(&entry.client, &client) => {
                    entry.refs -= 1;
                    Some(entry.refs)
                }
                _ => None,
            };
            match remaining {
                Some(0) => entries.remove(&key).map(|e| e.client),
                Some(refs) => {
                    if tracing::enabled!(tracing::Level::DEBUG) {
                        debug!(
                            target: "es_storage::registry",
                            cluster = %key,
                            refs,
                            "Released cluster client"
                        );
                    }
                    None
                }
                None => {
                    debug!(
                        target: "es_storage::registry",
                        cluster = %key,
                        "Release of unknown or stale handle ignored"
                    );
                    None
                }
            }
        };

        if let Some(client) = to_close {
            client.close();
            self.closed.fetch_add(1, Ordering::Relaxed);
            info!(target: "es_storage::registry", cluster = %key, "Closed cluster client");
        }
    }

    pub fn ref_count(&self, cluster_name: &str, nodes: &[NodeAddress]) -> usize {
        let key = ClusterKey::new(cluster_name, nodes.to_vec());
        self.entries.lock().get(&key).map(|e| e.refs).unwrap_or(0)
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            created: self.created.load(Ordering::Relaxed),
            shared: self.shared.load(Ordering::Relaxed),
            closed: self.closed.load(Ordering::Relaxed),
            live: self.entries.lock().len(),
        }
    }

    fn owns_slot(&self, key: &ClusterKey, slot: &Arc<Mutex<()>>) -> bool {
        self.inflight
            .lock()
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    /// Registers a freshly connected client. An entry that is already live
    /// for the key wins and the new client is closed.
    fn install(&self, key: ClusterKey, client: Arc<dyn SearchClient>) -> ClientHandle {
        let shared = {
            let mut entries = self.entries.lock();
            match entries.entry(key.clone()) {
                MapEntry::Occupied(mut occupied) => {
                    let entry = occupied.get_mut();
                    entry.refs += 1;
                    Some(Arc::clone(&entry.client))
                }
                MapEntry::Vacant(vacant) => {
                    vacant.insert(Entry {
                        client: Arc::clone(&client),
                        refs: 1,
                    });
                    None
                }
            }
        };

        match shared {
            Some(existing) => {
                client.close();
                self.shared.fetch_add(1, Ordering::Relaxed);
                warn!(
                    target: "es_storage::registry",
                    cluster = %key,
                    "Discarded duplicate cluster client"
                );
                ClientHandle {
                    key,
                    client: existing,
                }
            }
            None => {
                self.created.fetch_add(1, Ordering::Relaxed);
                info!(target: "es_storage::registry", cluster = %key, "Created cluster client");
                ClientHandle { key, client }
            }
        }
    }

    fn share_existing(&self, key: &ClusterKey) -> Option<ClientHandle> {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        entry.refs += 1;
        self.shared.fetch_add(1, Ordering::Relaxed);
        Some(ClientHandle {
            key: key.clone(),
            client: Arc::clone(&entry.client),
        })
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("stats", &self.stats())
            .finish()
    }
}
