use crate::engine::client::NodeAddress;
use std::fmt;

/// Identity of a cluster connection: two tables share a client only when both
/// the cluster name and the ordered node list match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    pub cluster_name: String,
    pub nodes: Vec<NodeAddress>,
}

impl ClusterKey {
    pub fn new(cluster_name: impl Into<String>, nodes: Vec<NodeAddress>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            nodes,
        }
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@", self.cluster_name)?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
