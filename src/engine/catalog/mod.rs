pub mod options;
pub mod table;

pub use options::TableOptions;
pub use table::{Column, DataType, Schema, TableDesc, TableMeta, TableStats};
