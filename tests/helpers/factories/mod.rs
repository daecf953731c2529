pub mod index_handle_factory;
pub mod table_desc_factory;
pub mod table_options_factory;

pub use index_handle_factory::IndexHandleFactory;
pub use table_desc_factory::TableDescFactory;
pub use table_options_factory::TableOptionsFactory;
