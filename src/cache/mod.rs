pub mod store;

pub use store::{CacheError, ResultCache, SCHEMA_VERSION};
