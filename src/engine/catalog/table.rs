use crate::engine::catalog::options::TableOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ELASTICSEARCH_STORE_TYPE: &str = "ELASTICSEARCH";

/// Column types an external index table can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int4,
    Int8,
    Float4,
    Float8,
    Text,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int4 => "INT4",
            DataType::Int8 => "INT8",
            DataType::Float4 => "FLOAT4",
            DataType::Float8 => "FLOAT8",
            DataType::Text => "TEXT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    /// Accepts the canonical names and the usual SQL aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(DataType::Boolean),
            "int4" | "int" | "integer" => Ok(DataType::Int4),
            "int8" | "bigint" | "long" => Ok(DataType::Int8),
            "float4" | "float" | "real" => Ok(DataType::Float4),
            "float8" | "double" => Ok(DataType::Float8),
            "text" | "string" | "varchar" => Ok(DataType::Text),
            other => Err(format!("unknown column type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        self.columns.push(Column {
            name: name.into(),
            data_type,
        });
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub store_type: String,
    pub options: TableOptions,
}

impl TableMeta {
    pub fn new(store_type: impl Into<String>, options: TableOptions) -> Self {
        Self {
            store_type: store_type.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub num_rows: u64,
}

/// Catalog view of an external table as handed over by the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDesc {
    pub name: String,
    pub external: bool,
    pub schema: Schema,
    pub meta: TableMeta,
    pub stats: Option<TableStats>,
}

impl TableDesc {
    pub fn new(name: impl Into<String>, schema: Schema, meta: TableMeta) -> Self {
        Self {
            name: name.into(),
            external: true,
            schema,
            meta,
            stats: None,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.meta.options
    }

    pub fn num_rows(&self) -> Option<u64> {
        self.stats.map(|s| s.num_rows)
    }
}
