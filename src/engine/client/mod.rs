pub mod cluster_key;
pub mod http;
pub mod node_address;
pub mod search_client;

pub use cluster_key::ClusterKey;
pub use http::{ClientOptions, HttpConnector, HttpSearchClient};
pub use node_address::NodeAddress;
pub use search_client::{Connector, PageStart, SearchClient, SearchHit, SearchPage};
