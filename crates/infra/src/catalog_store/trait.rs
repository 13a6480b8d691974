use std::cell::RefCell;
use std::sync::Arc;

use thiserror::Error;

use rentshop_catalog::{Category, CategoryLookup, NewCategory, Product, ProductFields, Slug};
use rentshop_core::{CategoryId, ProductId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another category already uses this slug.
    #[error("category with slug '{0}' already exists")]
    DuplicateSlug(Slug),

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A product write referenced a category that does not exist.
    #[error("product references missing category {0}")]
    MissingCategory(CategoryId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage contract for categories and products.
///
/// Listings are returned in natural ordering (by name). Reads distinguish
/// "absent" (`Ok(None)`) from "store failed" (`Err`).
pub trait CatalogStore: Send + Sync {
    fn insert_category(&self, input: NewCategory) -> Result<Category, StoreError>;
    fn rename_category(&self, id: CategoryId, input: NewCategory) -> Result<Category, StoreError>;
    /// Delete a category and every product in it. Returns the removed product ids.
    fn delete_category(&self, id: CategoryId) -> Result<Vec<ProductId>, StoreError>;
    fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;
    fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError>;
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    fn insert_product(&self, owner: UserId, fields: ProductFields) -> Result<Product, StoreError>;
    fn update_product(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError>;
    fn set_product_available(&self, id: ProductId, available: bool) -> Result<Product, StoreError>;
    fn delete_product(&self, id: ProductId) -> Result<(), StoreError>;
    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
    /// Lookup by the `(id, slug)` pair used in detail URLs.
    fn product_by_key(&self, id: ProductId, slug: &Slug) -> Result<Option<Product>, StoreError>;
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    fn products_in_category(&self, category: CategoryId) -> Result<Vec<Product>, StoreError>;
    fn products_of_owner(&self, owner: UserId) -> Result<Vec<Product>, StoreError>;
    /// Owner deletion cascade: remove every product owned by `owner`.
    fn delete_owner_products(&self, owner: UserId) -> Result<Vec<ProductId>, StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn insert_category(&self, input: NewCategory) -> Result<Category, StoreError> {
        (**self).insert_category(input)
    }

    fn rename_category(&self, id: CategoryId, input: NewCategory) -> Result<Category, StoreError> {
        (**self).rename_category(id, input)
    }

    fn delete_category(&self, id: CategoryId) -> Result<Vec<ProductId>, StoreError> {
        (**self).delete_category(id)
    }

    fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        (**self).get_category(id)
    }

    fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        (**self).category_by_slug(slug)
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }

    fn insert_product(&self, owner: UserId, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).insert_product(owner, fields)
    }

    fn update_product(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).update_product(id, fields)
    }

    fn set_product_available(&self, id: ProductId, available: bool) -> Result<Product, StoreError> {
        (**self).set_product_available(id, available)
    }

    fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete_product(id)
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get_product(id)
    }

    fn product_by_key(&self, id: ProductId, slug: &Slug) -> Result<Option<Product>, StoreError> {
        (**self).product_by_key(id, slug)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products()
    }

    fn products_in_category(&self, category: CategoryId) -> Result<Vec<Product>, StoreError> {
        (**self).products_in_category(category)
    }

    fn products_of_owner(&self, owner: UserId) -> Result<Vec<Product>, StoreError> {
        (**self).products_of_owner(owner)
    }

    fn delete_owner_products(&self, owner: UserId) -> Result<Vec<ProductId>, StoreError> {
        (**self).delete_owner_products(owner)
    }
}

/// Lets the product form resolve category references against any store.
///
/// The form only asks yes/no; a failed read answers "no" and is kept so the
/// caller can report the store failure instead of a field error.
pub struct StoreCategories<'a, S: ?Sized> {
    store: &'a S,
    failure: RefCell<Option<StoreError>>,
}

impl<'a, S: ?Sized> StoreCategories<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            failure: RefCell::new(None),
        }
    }

    /// First store failure seen during lookups, if any.
    pub fn into_failure(self) -> Option<StoreError> {
        self.failure.into_inner()
    }
}

impl<S> CategoryLookup for StoreCategories<'_, S>
where
    S: CatalogStore + ?Sized,
{
    fn category_exists(&self, id: CategoryId) -> bool {
        match self.store.get_category(id) {
            Ok(found) => found.is_some(),
            Err(err) => {
                self.failure.borrow_mut().get_or_insert(err);
                false
            }
        }
    }
}
