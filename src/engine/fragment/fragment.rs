use crate::engine::metadata::IndexHandle;
use crate::engine::split::ScanContext;
use serde::{Deserialize, Serialize};

/// A contiguous slice `[start_offset, start_offset + length)` of an index's
/// documents, read by exactly one scan task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    table_id: String,
    ordinal: usize,
    start_offset: u64,
    length: u64,
    source: IndexHandle,
    scan: Option<ScanContext>,
}

impl Fragment {
    pub(crate) fn new(
        table_id: impl Into<String>,
        ordinal: usize,
        start_offset: u64,
        length: u64,
        source: IndexHandle,
    ) -> Self {
        debug_assert!(length > 0, "zero-length fragment");
        Self {
            table_id: table_id.into(),
            ordinal,
            start_offset,
            length,
            source,
            scan: None,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Exclusive end offset.
    pub fn end_offset(&self) -> u64 {
        self.start_offset + self.length
    }

    pub fn source(&self) -> &IndexHandle {
        &self.source
    }

    pub fn scan(&self) -> Option<&ScanContext> {
        self.scan.as_ref()
    }

    pub(crate) fn with_scan(mut self, scan: ScanContext) -> Self {
        self.scan = Some(scan);
        self
    }
}
