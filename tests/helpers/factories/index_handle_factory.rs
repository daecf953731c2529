use crate::engine::client::NodeAddress;
use crate::engine::metadata::IndexHandle;

pub struct IndexHandleFactory {
    handle: IndexHandle,
}

impl IndexHandleFactory {
    pub fn new() -> Self {
        Self {
            handle: IndexHandle {
                cluster_name: "testTajoCluster".to_string(),
                node_addresses: vec![NodeAddress::new("localhost", 9300)],
                index_name: "test_index".to_string(),
                type_name: "test_type".to_string(),
                fetch_size: 100,
            },
        }
    }

    pub fn with_fetch_size(mut self, fetch_size: u64) -> Self {
        self.handle.fetch_size = fetch_size;
        self
    }

    pub fn with_index(mut self, index: &str) -> Self {
        self.handle.index_name = index.to_string();
        self
    }

    pub fn create(self) -> IndexHandle {
        self.handle
    }
}
