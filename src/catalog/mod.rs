pub mod catalog_store;

pub use catalog_store::{CatalogStore, Reconciliation, DEFAULT_STORAGE_KEY};
