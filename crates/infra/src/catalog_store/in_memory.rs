use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use rentshop_catalog::{Category, NewCategory, Product, ProductFields, Slug};
use rentshop_core::{CategoryId, ProductId, UserId};

use super::r#trait::{CatalogStore, StoreError};

#[derive(Debug, Default)]
struct State {
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
}

impl State {
    fn slug_taken(&self, slug: &Slug, except: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|c| c.slug() == slug && Some(c.id_typed()) != except)
    }

    fn ensure_category(&self, id: CategoryId) -> Result<(), StoreError> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::MissingCategory(id))
        }
    }

    fn remove_products_where(&mut self, pred: impl Fn(&Product) -> bool) -> Vec<ProductId> {
        let mut removed: Vec<ProductId> = self
            .products
            .values()
            .filter(|&p| pred(p))
            .map(Product::id_typed)
            .collect();
        removed.sort();
        for id in &removed {
            self.products.remove(id);
        }
        removed
    }

    fn sorted_products(&self, pred: impl Fn(&Product) -> bool) -> Vec<Product> {
        let mut out: Vec<Product> = self.products.values().filter(|&p| pred(p)).cloned().collect();
        out.sort_by(Product::natural_order);
        out
    }
}

/// In-memory catalog store.
///
/// Intended for tests/dev. Enforces the same constraints a relational backend
/// would (unique category slug, cascading deletes, foreign keys).
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    state: RwLock<State>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn insert_category(&self, input: NewCategory) -> Result<Category, StoreError> {
        let mut state = self.write()?;
        if state.slug_taken(input.slug(), None) {
            return Err(StoreError::DuplicateSlug(input.slug().clone()));
        }

        let category = Category::create(CategoryId::new(), input, Utc::now());
        state.categories.insert(category.id_typed(), category.clone());
        tracing::info!(category_id = %category.id_typed(), slug = %category.slug(), "category created");
        Ok(category)
    }

    fn rename_category(&self, id: CategoryId, input: NewCategory) -> Result<Category, StoreError> {
        let mut state = self.write()?;
        if !state.categories.contains_key(&id) {
            return Err(StoreError::CategoryNotFound(id));
        }
        if state.slug_taken(input.slug(), Some(id)) {
            return Err(StoreError::DuplicateSlug(input.slug().clone()));
        }

        let category = state
            .categories
            .get_mut(&id)
            .ok_or(StoreError::CategoryNotFound(id))?;
        category.rename(input, Utc::now());
        Ok(category.clone())
    }

    fn delete_category(&self, id: CategoryId) -> Result<Vec<ProductId>, StoreError> {
        let mut state = self.write()?;
        if state.categories.remove(&id).is_none() {
            return Err(StoreError::CategoryNotFound(id));
        }

        let removed = state.remove_products_where(|p| p.category() == id);
        tracing::info!(category_id = %id, cascaded = removed.len(), "category deleted");
        Ok(removed)
    }

    fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.values().find(|c| c.slug() == slug).cloned())
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let state = self.read()?;
        let mut out: Vec<Category> = state.categories.values().cloned().collect();
        out.sort_by(Category::natural_order);
        Ok(out)
    }

    fn insert_product(&self, owner: UserId, fields: ProductFields) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        state.ensure_category(fields.category())?;

        let product = Product::create(ProductId::new(), owner, fields, Utc::now());
        state.products.insert(product.id_typed(), product.clone());
        tracing::info!(product_id = %product.id_typed(), owner = %owner, "product created");
        Ok(product)
    }

    fn update_product(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        state.ensure_category(fields.category())?;

        let product = state.products.get_mut(&id).ok_or(StoreError::ProductNotFound(id))?;
        product.apply_edit(fields, Utc::now());
        Ok(product.clone())
    }

    fn set_product_available(&self, id: ProductId, available: bool) -> Result<Product, StoreError> {
        let mut state = self.write()?;
        let product = state.products.get_mut(&id).ok_or(StoreError::ProductNotFound(id))?;
        product.set_available(available, Utc::now());
        Ok(product.clone())
    }

    fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        let mut state = self.write()?;
        state
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ProductNotFound(id))
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn product_by_key(&self, id: ProductId, slug: &Slug) -> Result<Option<Product>, StoreError> {
        Ok(self
            .read()?
            .products
            .get(&id)
            .filter(|p| p.lookup_key() == (id, slug))
            .cloned())
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read()?.sorted_products(|_| true))
    }

    fn products_in_category(&self, category: CategoryId) -> Result<Vec<Product>, StoreError> {
        Ok(self.read()?.sorted_products(|p| p.category() == category))
    }

    fn products_of_owner(&self, owner: UserId) -> Result<Vec<Product>, StoreError> {
        Ok(self.read()?.sorted_products(|p| p.owner() == owner))
    }

    fn delete_owner_products(&self, owner: UserId) -> Result<Vec<ProductId>, StoreError> {
        let mut state = self.write()?;
        let removed = state.remove_products_where(|p| p.owner() == owner);
        tracing::info!(owner = %owner, cascaded = removed.len(), "owner products deleted");
        Ok(removed)
    }
}

#[cfg(test)]
impl InMemoryCatalogStore {
    /// Leave the lock poisoned, as a writer panicking mid-update would.
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.state.write();
            panic!("writer panicked while holding the catalog lock");
        }));
    }
}
