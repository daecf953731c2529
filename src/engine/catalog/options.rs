use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const OPT_CLUSTER: &str = "es.cluster";
pub const OPT_NODES: &str = "es.nodes";
pub const OPT_INDEX: &str = "es.index";
pub const OPT_TYPE: &str = "es.type";
pub const OPT_FETCH_SIZE: &str = "es.fetch.size";

/// String key/value options attached to an external table definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    values: HashMap<String, String>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
