use crate::engine::catalog::{Column, Schema};
use crate::engine::client::{PageStart, SearchClient, SearchHit};
use crate::engine::errors::StorageError;
use crate::engine::fragment::Fragment;
use crate::engine::scan::{Datum, Tuple};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const META_ID: &str = "_id";
const META_TYPE: &str = "_type";
const META_SCORE: &str = "_score";

/// Reads exactly one fragment's document range, page by page.
#[derive(Debug)]
pub struct FragmentScanner {
    client: Arc<dyn SearchClient>,
    fragment: Fragment,
    columns: Vec<Column>,
    position: u64,
    cursor: Option<Value>,
    page_size: u64,
    exhausted: bool,
}

impl FragmentScanner {
    /// Output columns follow the fragment's projection when it has one,
    /// otherwise the full table schema.
    pub fn open(
        client: Arc<dyn SearchClient>,
        fragment: Fragment,
        schema: &Schema,
    ) -> Result<Self, StorageError> {
        let projection = fragment
            .scan()
            .map(|s| s.projected_columns.as_slice())
            .unwrap_or_default();

        let columns = if projection.is_empty() {
            schema.columns().to_vec()
        } else {
            projection
                .iter()
                .map(|name| {
                    schema.column(name).cloned().ok_or_else(|| {
                        StorageError::configuration(
                            fragment.table_id(),
                            name,
                            "is projected but not part of the table schema",
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let page_size = fragment.source().fetch_size.max(1);
        let position = fragment.start_offset();
        Ok(Self {
            client,
            fragment,
            columns,
            position,
            cursor: None,
            page_size,
            exhausted: false,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Next page of rows, or `None` once the fragment is consumed.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<Tuple>>, StorageError> {
        let end = self.fragment.end_offset();
        if self.exhausted || self.position >= end {
            self.exhausted = true;
            return Ok(None);
        }

        let length = self.page_size.min(end - self.position);
        // Later pages continue from the cursor so deep offsets are not rescanned
        let start = match self.cursor.take() {
            Some(cursor) => PageStart::After(cursor),
            None => PageStart::Offset(self.position),
        };
        let source = self.fragment.source();
        let page = self
            .client
            .search(&source.index_name, &source.type_name, start, length)
            .await?;
        let hits = page.hits;
        self.cursor = page.cursor;

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "es_storage::scanner",
                table = self.fragment.table_id(),
                ordinal = self.fragment.ordinal(),
                offset = self.position,
                requested = length,
                received = hits.len(),
                "Fetched page"
            );
        }

        // A short page means the index shrank since planning
        if (hits.len() as u64) < length {
            self.exhausted = true;
        }
        self.position += length;

        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(hits.iter().map(|hit| self.to_tuple(hit)).collect()))
    }

    pub async fn collect_all(mut self) -> Result<Vec<Tuple>, StorageError> {
        let mut rows = Vec::new();
        while let Some(batch) = self.next_batch().await? {
            rows.extend(batch);
        }
        Ok(rows)
    }

    fn to_tuple(&self, hit: &SearchHit) -> Tuple {
        self.columns
            .iter()
            .map(|col| {
                let converted = match col.name.as_str() {
                    META_ID => Datum::from_text(&hit.id, col.data_type),
                    META_TYPE => Datum::from_text(&hit.doc_type, col.data_type),
                    META_SCORE => match hit.score {
                        Some(score) => Datum::from_json(&score.into(), col.data_type),
                        None => Some(Datum::Null),
                    },
                    name => match hit.source.get(name) {
                        Some(value) => Datum::from_json(value, col.data_type),
                        None => Some(Datum::Null),
                    },
                };
                converted.unwrap_or_else(|| {
                    warn!(
                        target: "es_storage::scanner",
                        doc_id = %hit.id,
                        column = %col.name,
                        data_type = %col.data_type,
                        "Value does not fit column type, reading NULL"
                    );
                    Datum::Null
                })
            })
            .collect()
    }
}
