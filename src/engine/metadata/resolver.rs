use crate::engine::catalog::options::{
    OPT_CLUSTER, OPT_FETCH_SIZE, OPT_INDEX, OPT_NODES, OPT_TYPE,
};
use crate::engine::catalog::table::ELASTICSEARCH_STORE_TYPE;
use crate::engine::catalog::{TableDesc, TableOptions};
use crate::engine::client::{NodeAddress, SearchClient};
use crate::engine::errors::StorageError;
use crate::engine::metadata::IndexHandle;
use crate::shared::config::CONFIG;
use std::time::Duration;
use tracing::{debug, info};

/// Characters the cluster refuses in index and type names, and that would
/// otherwise leak into the request path.
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '\\', '?', '#', '*', '"', '<', '>', '|', ',', ' '];

/// Turns table options into an [`IndexHandle`] and fetches the row count
/// statistic for it.
#[derive(Debug, Clone, Copy)]
pub struct MetadataResolver {
    count_timeout: Duration,
}

impl MetadataResolver {
    pub fn new(count_timeout: Duration) -> Self {
        Self { count_timeout }
    }

    pub fn from_config() -> Self {
        Self::new(Duration::from_millis(CONFIG.client.request_timeout_ms))
    }

    /// Checks the store type, then resolves the table's options.
    pub fn resolve_table(desc: &TableDesc) -> Result<IndexHandle, StorageError> {
        if !desc
            .meta
            .store_type
            .eq_ignore_ascii_case(ELASTICSEARCH_STORE_TYPE)
        {
            return Err(StorageError::configuration(
                &desc.name,
                "store_type",
                format!(
                    "is '{}', expected {}",
                    desc.meta.store_type, ELASTICSEARCH_STORE_TYPE
                ),
            ));
        }
        Self::resolve(&desc.name, desc.options())
    }

    pub fn resolve(table: &str, options: &TableOptions) -> Result<IndexHandle, StorageError> {
        let cluster_name = required(table, options, OPT_CLUSTER)?;
        let raw_nodes = required(table, options, OPT_NODES)?;
        let index_name = required(table, options, OPT_INDEX)?;
        let type_name = required(table, options, OPT_TYPE)?;
        let raw_fetch_size = required(table, options, OPT_FETCH_SIZE)?;

        let node_addresses = NodeAddress::parse_list(raw_nodes)
            .map_err(|reason| StorageError::configuration(table, OPT_NODES, reason))?;
        check_name(table, OPT_INDEX, index_name)?;
        check_name(table, OPT_TYPE, type_name)?;

        let fetch_size = raw_fetch_size
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                StorageError::configuration(
                    table,
                    OPT_FETCH_SIZE,
                    format!("must be a positive integer, got '{raw_fetch_size}'"),
                )
            })?;

        let handle = IndexHandle {
            cluster_name: cluster_name.to_string(),
            node_addresses,
            index_name: index_name.to_string(),
            type_name: type_name.to_string(),
            fetch_size,
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "es_storage::resolver",
                table,
                cluster = %handle.cluster_name,
                nodes = %handle.nodes_display(),
                index = %handle.index_name,
                doc_type = %handle.type_name,
                fetch_size,
                "Resolved index handle"
            );
        }
        Ok(handle)
    }

    /// Fresh document count for the handle's index/type. Never cached: the
    /// external population can change between calls.
    pub async fn fetch_count(
        &self,
        table: &str,
        handle: &IndexHandle,
        client: &dyn SearchClient,
    ) -> Result<u64, StorageError> {
        let count = client.count(&handle.index_name, &handle.type_name);
        let row_count = match tokio::time::timeout(self.count_timeout, count).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(StorageError::unavailable(
                    &handle.cluster_name,
                    format!(
                        "count for table '{table}' ({}/{}) timed out after {}ms",
                        handle.index_name,
                        handle.type_name,
                        self.count_timeout.as_millis()
                    ),
                ));
            }
        };

        info!(
            target: "es_storage::resolver",
            table,
            cluster = %handle.cluster_name,
            index = %handle.index_name,
            doc_type = %handle.type_name,
            row_count,
            "Fetched row count"
        );
        Ok(row_count)
    }
}

fn required<'a>(
    table: &str,
    options: &'a TableOptions,
    key: &str,
) -> Result<&'a str, StorageError> {
    match options.get(key).map(str::trim) {
        None => Err(StorageError::configuration(table, key, "is missing")),
        Some("") => Err(StorageError::configuration(table, key, "is empty")),
        Some(value) => Ok(value),
    }
}

fn check_name(table: &str, key: &str, name: &str) -> Result<(), StorageError> {
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(StorageError::configuration(
            table,
            key,
            format!("contains forbidden character '{c}'"),
        ));
    }
    Ok(())
}
