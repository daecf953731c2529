pub mod fake_connector;
pub mod fake_search_client;

pub use fake_connector::FakeConnector;
pub use fake_search_client::{FakeFailure, FakeSearchClient};
