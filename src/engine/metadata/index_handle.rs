use crate::engine::client::NodeAddress;
use serde::{Deserialize, Serialize};

/// Validated identity of an external index/type plus how to reach it.
/// Built only by [`crate::engine::metadata::MetadataResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexHandle {
    pub cluster_name: String,
    pub node_addresses: Vec<NodeAddress>,
    pub index_name: String,
    pub type_name: String,
    /// Documents per fragment.
    pub fetch_size: u64,
}

impl IndexHandle {
    pub fn nodes_display(&self) -> String {
        self.node_addresses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
