//! Storage adapter exposing search-cluster indexes as external tables.
//!
//! An index's documents are split into contiguous fetch-size fragments that
//! the query engine schedules as independent scan tasks. Entry point is
//! [`engine::storage::ElasticsearchStorageManager`].

pub mod engine;
pub mod logging;
pub mod shared;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
