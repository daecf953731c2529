use crate::engine::metadata::IndexHandle;
use serde::{Deserialize, Serialize};

/// What a scan operator contributes to a split request. Attached to every
/// fragment it produces; never used to decide partition boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanContext {
    pub scan_id: u32,
    /// Columns the scan reads, in output order. Empty means all columns.
    pub projected_columns: Vec<String>,
    /// Row estimate from the logical plan's statistics.
    pub row_count_hint: Option<u64>,
    /// Upper bound on fragments for this scan; overrides the planner default.
    pub max_parallelism: Option<usize>,
}

impl ScanContext {
    pub fn new(scan_id: u32) -> Self {
        Self {
            scan_id,
            ..Self::default()
        }
    }

    pub fn with_projection<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projected_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_row_count_hint(mut self, rows: u64) -> Self {
        self.row_count_hint = Some(rows);
        self
    }

    pub fn with_max_parallelism(mut self, max: usize) -> Self {
        self.max_parallelism = Some(max);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// Direct read with no plan context.
    NonForward,
    /// Issued for a scan operator of a distributed plan.
    ForwardScan(ScanContext),
}

#[derive(Debug, Clone)]
pub struct SplitPlanRequest {
    pub table_id: String,
    pub handle: IndexHandle,
    /// Count fetched when the handle was resolved for this request.
    pub row_count: u64,
    pub mode: SplitMode,
}

impl SplitPlanRequest {
    pub fn non_forward(table_id: impl Into<String>, handle: IndexHandle, row_count: u64) -> Self {
        Self {
            table_id: table_id.into(),
            handle,
            row_count,
            mode: SplitMode::NonForward,
        }
    }

    pub fn forward_scan(
        table_id: impl Into<String>,
        handle: IndexHandle,
        row_count: u64,
        scan: ScanContext,
    ) -> Self {
        Self {
            table_id: table_id.into(),
            handle,
            row_count,
            mode: SplitMode::ForwardScan(scan),
        }
    }
}
