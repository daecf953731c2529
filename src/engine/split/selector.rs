use crate::engine::errors::StorageError;
use crate::engine::fragment::{Fragment, FragmentPlanner, verify_coverage};
use crate::engine::split::{SplitMode, SplitPlanRequest};
use crate::shared::config::CONFIG;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlannerOptions {
    /// Applied to scan-node splits whose context carries no bound of its own.
    pub max_parallelism: Option<usize>,
}

impl PlannerOptions {
    pub fn from_config() -> Self {
        Self {
            max_parallelism: CONFIG.planner.max_parallelism,
        }
    }
}

/// Single entry point for both split modes. Partitioning always comes from
/// [`FragmentPlanner`]; the modes differ only in what is layered on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitStrategySelector {
    options: PlannerOptions,
}

impl SplitStrategySelector {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn from_config() -> Self {
        Self::new(PlannerOptions::from_config())
    }

    pub fn build_splits(&self, request: &SplitPlanRequest) -> Result<Vec<Fragment>, StorageError> {
        if request.handle.fetch_size == 0 {
            return Err(StorageError::InvalidFetchSize {
                table: request.table_id.clone(),
                fetch_size: 0,
            });
        }

        let planner = FragmentPlanner::new(&request.table_id, &request.handle);

        let fragments = match &request.mode {
            SplitMode::NonForward => planner.plan(request.row_count)?,
            SplitMode::ForwardScan(scan) => {
                let bound = scan.max_parallelism.or(self.options.max_parallelism);
                let bounded = planner.plan_bounded(request.row_count, bound)?;

                if tracing::enabled!(tracing::Level::DEBUG) {
                    debug!(
                        target: "es_storage::splits",
                        table = %request.table_id,
                        scan_id = scan.scan_id,
                        projected = scan.projected_columns.len(),
                        row_count_hint = ?scan.row_count_hint,
                        max_parallelism = ?bound,
                        "Attaching scan context"
                    );
                }

                bounded
                    .into_iter()
                    .map(|f| f.with_scan(scan.clone()))
                    .collect()
            }
        };

        // All-or-nothing: a plan that does not tile the population is never returned
        verify_coverage(&request.table_id, &fragments, request.row_count)?;

        info!(
            target: "es_storage::splits",
            table = %request.table_id,
            mode = mode_name(&request.mode),
            row_count = request.row_count,
            fragment_count = fragments.len(),
            "Splits built"
        );
        Ok(fragments)
    }
}

fn mode_name(mode: &SplitMode) -> &'static str {
    match mode {
        SplitMode::NonForward => "non_forward",
        SplitMode::ForwardScan(_) => "forward_scan",
    }
}
