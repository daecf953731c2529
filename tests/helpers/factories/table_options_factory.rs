use crate::engine::catalog::TableOptions;
use crate::engine::catalog::options::{OPT_CLUSTER, OPT_FETCH_SIZE, OPT_INDEX, OPT_NODES, OPT_TYPE};
use std::collections::HashMap;

/// The option set of the `test_index` fixture table.
pub struct TableOptionsFactory {
    params: HashMap<String, Option<String>>,
}

impl TableOptionsFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert(OPT_CLUSTER.into(), Some("testTajoCluster".to_string()));
        params.insert(OPT_NODES.into(), Some("localhost:9300".to_string()));
        params.insert(OPT_INDEX.into(), Some("test_index".to_string()));
        params.insert(OPT_TYPE.into(), Some("test_type".to_string()));
        params.insert(OPT_FETCH_SIZE.into(), Some("100".to_string()));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), Some(value.into()));
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.params.insert(key.to_string(), None);
        self
    }

    pub fn create(self) -> TableOptions {
        self.params
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .fold(TableOptions::new(), |opts, (k, v)| opts.with(k, v))
    }
}
