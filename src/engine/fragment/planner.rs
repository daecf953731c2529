use crate::engine::errors::StorageError;
use crate::engine::fragment::{Fragment, FragmentCoalescer, Run};
use crate::engine::metadata::IndexHandle;
use tracing::{info, trace};

/// Splits an index's document population into fetch-size fragments.
pub struct FragmentPlanner<'a> {
    pub table_id: &'a str,
    pub handle: &'a IndexHandle,
}

impl<'a> FragmentPlanner<'a> {
    pub fn new(table_id: &'a str, handle: &'a IndexHandle) -> Self {
        Self { table_id, handle }
    }

    /// `ceil(row_count / fetch_size)` fragments. Every fragment but the last
    /// covers `fetch_size` documents; the last takes the non-empty remainder.
    /// Zero rows plan zero fragments. Same inputs, same output.
    pub fn plan(&self, row_count: u64) -> Result<Vec<Fragment>, StorageError> {
        self.plan_bounded(row_count, None)
    }

    /// Same partitioning as [`plan`](Self::plan), with adjacent fragments
    /// coalesced down to `max_fragments` when the natural count exceeds it.
    /// Boundaries come straight from the coalesced layout; the unbounded
    /// plan is never built.
    pub fn plan_bounded(
        &self,
        row_count: u64,
        max_fragments: Option<usize>,
    ) -> Result<Vec<Fragment>, StorageError> {
        let fetch_size = self.checked_fetch_size()?;
        let pages = row_count.div_ceil(fetch_size);
        let runs = match max_fragments {
            Some(max) => FragmentCoalescer::new(max).layout(pages),
            None => Run::uniform(pages),
        };

        let count: u64 = runs.iter().map(|run| run.count).sum();
        let mut fragments = Vec::new();
        usize::try_from(count)
            .ok()
            .and_then(|n| fragments.try_reserve_exact(n).ok())
            .ok_or_else(|| StorageError::InvalidRowCount {
                table: self.table_id.to_string(),
                reason: format!(
                    "{row_count} documents at fetch size {fetch_size} need {count} fragments, \
                     more than can be planned"
                ),
            })?;

        let mut page = 0u64;
        for run in &runs {
            for _ in 0..run.count {
                let start = page * fetch_size;
                let end = (page + run.units).saturating_mul(fetch_size).min(row_count);
                let ordinal = fragments.len();

                if tracing::enabled!(tracing::Level::TRACE) {
                    trace!(
                        target: "es_storage::planner",
                        table = self.table_id,
                        ordinal,
                        start,
                        length = end - start,
                        "Planned fragment"
                    );
                }

                fragments.push(Fragment::new(
                    self.table_id,
                    ordinal,
                    start,
                    end - start,
                    self.handle.clone(),
                ));
                page += run.units;
            }
        }

        info!(
            target: "es_storage::planner",
            table = self.table_id,
            index = %self.handle.index_name,
            row_count,
            fetch_size,
            max_fragments = ?max_fragments,
            fragment_count = fragments.len(),
            "Fragment planning completed"
        );
        Ok(fragments)
    }

    fn checked_fetch_size(&self) -> Result<u64, StorageError> {
        match self.handle.fetch_size {
            0 => Err(StorageError::InvalidFetchSize {
                table: self.table_id.to_string(),
                fetch_size: 0,
            }),
            n => Ok(n),
        }
    }
}
