use crate::engine::catalog::{TableDesc, TableStats};
use crate::engine::errors::StorageError;
use crate::engine::fragment::Fragment;
use crate::engine::metadata::{IndexHandle, MetadataResolver};
use crate::engine::registry::ConnectionRegistry;
use crate::engine::split::{ScanContext, SplitPlanRequest, SplitStrategySelector};
use std::sync::Arc;
use tracing::info;

/// Storage-manager face of the adapter: what the query engine calls at
/// table-creation and planning time.
#[derive(Debug)]
pub struct ElasticsearchStorageManager {
    registry: Arc<ConnectionRegistry>,
    resolver: MetadataResolver,
    selector: SplitStrategySelector,
}

impl ElasticsearchStorageManager {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        resolver: MetadataResolver,
        selector: SplitStrategySelector,
    ) -> Self {
        Self {
            registry,
            resolver,
            selector,
        }
    }

    pub fn from_config(registry: Arc<ConnectionRegistry>) -> Self {
        Self::new(
            registry,
            MetadataResolver::from_config(),
            SplitStrategySelector::from_config(),
        )
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Validates the table's options and records the current document count
    /// as its row statistic.
    pub async fn create_table(&self, desc: &mut TableDesc) -> Result<(), StorageError> {
        let result = async {
            let handle = MetadataResolver::resolve_table(desc)?;
            self.row_count(&desc.name, &handle).await
        }
        .await;

        let num_rows = result.inspect_err(StorageError::log_error)?;
        desc.stats = Some(TableStats { num_rows });

        info!(
            target: "es_storage::splits",
            table = %desc.name,
            num_rows,
            "External table registered"
        );
        Ok(())
    }

    /// Fragments for a scan operator. Every fragment is tagged with `plan_id`
    /// and carries `scan`.
    pub async fn get_splits(
        &self,
        plan_id: &str,
        desc: &TableDesc,
        scan: &ScanContext,
    ) -> Result<Vec<Fragment>, StorageError> {
        let result = async {
            let handle = MetadataResolver::resolve_table(desc)?;
            let row_count = self.row_count(&desc.name, &handle).await?;
            let request = SplitPlanRequest::forward_scan(plan_id, handle, row_count, scan.clone());
            self.selector.build_splits(&request)
        }
        .await;

        result.inspect_err(StorageError::log_error)
    }

    /// Direct-read fragments: the full plan windowed to ordinals
    /// `[start_index, start_index + count)`. Ordinals and offsets are those of
    /// the full plan so pages can be requested independently.
    pub async fn get_non_forward_split(
        &self,
        desc: &TableDesc,
        start_index: usize,
        count: usize,
    ) -> Result<Vec<Fragment>, StorageError> {
        let result = async {
            let handle = MetadataResolver::resolve_table(desc)?;
            let row_count = self.row_count(&desc.name, &handle).await?;
            let request = SplitPlanRequest::non_forward(&desc.name, handle, row_count);
            self.selector.build_splits(&request)
        }
        .await;

        let fragments = result.inspect_err(StorageError::log_error)?;
        Ok(fragments.into_iter().skip(start_index).take(count).collect())
    }

    /// Count through a registry client that is released whatever the outcome.
    async fn row_count(&self, table: &str, handle: &IndexHandle) -> Result<u64, StorageError> {
        let client = self
            .registry
            .acquire(&handle.cluster_name, &handle.node_addresses)?;
        let result = self
            .resolver
            .fetch_count(table, handle, client.client().as_ref())
            .await;
        self.registry.release(client);
        result
    }
}
