//! Rental catalog domain module.
//!
//! Categories, rentable products and the form that turns a raw product
//! submission into a validated record. Pure domain logic: no IO, no HTTP, no
//! storage.

pub mod category;
pub mod config;
pub mod form;
pub mod image;
pub mod price;
pub mod product;
pub mod rent_duration;
pub mod routes;
pub mod slug;

pub use category::{Category, NewCategory};
pub use config::CatalogConfig;
pub use form::{CategoryLookup, FormMode, ProductForm, ProductSubmission};
pub use image::{ImageRef, UploadedFile};
pub use price::Price;
pub use product::{Product, ProductFields};
pub use rent_duration::RentDuration;
pub use slug::{Slug, slugify};
