//! Catalog persistence boundary.
//!
//! The catalog crate never stores anything itself. Whatever backs this trait
//! owns slug uniqueness on categories, cascading deletes from categories and
//! owners to products, and the `created_at`/`updated_at` timestamps.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{CatalogStore, StoreCategories, StoreError};
