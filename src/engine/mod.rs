pub mod catalog;
pub mod client;
pub mod errors;
pub mod fragment;
pub mod metadata;
pub mod registry;
pub mod scan;
pub mod split;
pub mod storage;

pub use errors::*;
