pub mod index_handle;
pub mod resolver;

pub use index_handle::IndexHandle;
pub use resolver::MetadataResolver;
