//! `rentshop-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and its
//! storage adapters (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, Timestamps};
pub use error::{DomainError, FieldError, ValidationErrors};
pub use id::{CategoryId, ProductId, UserId};
pub use value_object::ValueObject;
