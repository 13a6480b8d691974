//! Infrastructure layer: catalog storage and request-scoped orchestration.

pub mod catalog_store;
pub mod submission;

pub use catalog_store::{CatalogStore, InMemoryCatalogStore, StoreCategories, StoreError};
pub use submission::{ProductSubmissions, SubmitError};
