//! Product submission pipeline (application-level orchestration).
//!
//! ```text
//! ProductSubmission
//!   ↓
//! 1. Validate with the product form (create or edit mode)
//!   ↓
//! 2. Persist through the catalog store (insert or update)
//! ```
//!
//! A rejected submission never reaches the store. Ownership checks belong to
//! the caller; this layer only records who created the listing.

use chrono::NaiveDate;
use thiserror::Error;

use rentshop_catalog::form::INVALID_CATEGORY;
use rentshop_catalog::{CatalogConfig, Product, ProductFields, ProductForm, ProductSubmission};
use rentshop_core::{ProductId, UserId, ValidationErrors};

use crate::catalog_store::{CatalogStore, StoreCategories, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Field-level failures to show back to the user.
    #[error("invalid submission: {0}")]
    Invalid(ValidationErrors),

    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Store(StoreError),
}

impl SubmitError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        match err {
            // The category vanished between validation and write.
            StoreError::MissingCategory(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("category", INVALID_CATEGORY);
                SubmitError::Invalid(errors)
            }
            StoreError::ProductNotFound(id) => SubmitError::NotFound(id),
            other => SubmitError::Store(other),
        }
    }
}

/// Validate-then-persist entry point for product create/edit requests.
#[derive(Debug)]
pub struct ProductSubmissions<S> {
    store: S,
    config: CatalogConfig,
}

impl<S> ProductSubmissions<S>
where
    S: CatalogStore,
{
    pub fn new(store: S, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a new listing and insert it, owned by `owner`.
    #[tracing::instrument(skip_all, fields(owner = %owner))]
    pub fn create(
        &self,
        owner: UserId,
        submission: &ProductSubmission,
        today: NaiveDate,
    ) -> Result<Product, SubmitError> {
        let fields = self.validate(ProductForm::create(), submission, today)?;
        Ok(self.store.insert_product(owner, fields)?)
    }

    /// Validate an edit of product `id` and write it back.
    ///
    /// The product's current image stands in when no new file is uploaded.
    #[tracing::instrument(skip_all, fields(product_id = %id))]
    pub fn edit(
        &self,
        id: ProductId,
        submission: &ProductSubmission,
        today: NaiveDate,
    ) -> Result<Product, SubmitError> {
        let existing = self.store.get_product(id)?.ok_or(SubmitError::NotFound(id))?;

        let fields = self.validate(ProductForm::edit(existing.image().cloned()), submission, today)?;
        Ok(self.store.update_product(id, fields)?)
    }

    /// A store failure during the category check wins over the field error it caused.
    fn validate(
        &self,
        form: ProductForm,
        submission: &ProductSubmission,
        today: NaiveDate,
    ) -> Result<ProductFields, SubmitError> {
        let categories = StoreCategories::new(&self.store);
        let validated = form
            .with_config(&self.config)
            .validate(submission, &categories, today);

        if let Some(err) = categories.into_failure() {
            tracing::warn!(error = %err, "category lookup failed during validation");
            return Err(SubmitError::Store(err));
        }
        validated.map_err(SubmitError::Invalid)
    }
}
