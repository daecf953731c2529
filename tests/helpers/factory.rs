pub use super::factories::{IndexHandleFactory, TableDescFactory, TableOptionsFactory};

pub struct Factory;

impl Factory {
    pub fn table_desc() -> TableDescFactory {
        TableDescFactory::new()
    }

    pub fn index_handle() -> IndexHandleFactory {
        IndexHandleFactory::new()
    }

    pub fn options() -> TableOptionsFactory {
        TableOptionsFactory::new()
    }
}
