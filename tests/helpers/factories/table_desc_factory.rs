use crate::engine::catalog::table::ELASTICSEARCH_STORE_TYPE;
use crate::engine::catalog::{DataType, Schema, TableDesc, TableMeta, TableOptions};
use crate::test_helpers::factory::Factory;

pub struct TableDescFactory {
    name: String,
    store_type: String,
    options: TableOptions,
    schema: Schema,
}

impl TableDescFactory {
    pub fn new() -> Self {
        Self {
            name: "test_index".to_string(),
            store_type: ELASTICSEARCH_STORE_TYPE.to_string(),
            options: Factory::options().create(),
            schema: Self::fixture_schema(),
        }
    }

    /// `_type, _score, _id, field1, field2, field3`
    pub fn fixture_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_column("_type", DataType::Text)
            .add_column("_score", DataType::Float8)
            .add_column("_id", DataType::Text)
            .add_column("field1", DataType::Int8)
            .add_column("field2", DataType::Text)
            .add_column("field3", DataType::Text);
        schema
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_store_type(mut self, store_type: &str) -> Self {
        self.store_type = store_type.to_string();
        self
    }

    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn create(self) -> TableDesc {
        TableDesc::new(
            self.name,
            self.schema,
            TableMeta::new(self.store_type, self.options),
        )
    }
}
