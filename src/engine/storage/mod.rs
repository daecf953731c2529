pub mod manager;

pub use manager::ElasticsearchStorageManager;
