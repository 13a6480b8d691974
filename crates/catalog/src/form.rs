//! Product form: validates and coerces a raw submission into [`ProductFields`].
//!
//! One validator serves both the create and the edit page; [`FormMode`] only
//! decides where an image may come from.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rentshop_core::{CategoryId, ValidationErrors};

use crate::config::CatalogConfig;
use crate::image::{self, ImageRef, UploadedFile};
use crate::price::Price;
use crate::product::{self, ProductFields};
use crate::rent_duration::RentDuration;
use crate::slug::Slug;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CATEGORY: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Submitted fields, in the order errors are reported.
pub const FIELDS: [&str; 7] = ["name", "slug", "category", "description", "price", "rent_duration", "image"];

/// Existence check for the category a product points at.
pub trait CategoryLookup {
    fn category_exists(&self, id: CategoryId) -> bool;
}

impl CategoryLookup for HashSet<CategoryId> {
    fn category_exists(&self, id: CategoryId) -> bool {
        self.contains(&id)
    }
}

impl CategoryLookup for [CategoryId] {
    fn category_exists(&self, id: CategoryId) -> bool {
        self.contains(&id)
    }
}

/// Whether the validated record will be inserted or used to update an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// `current_image` satisfies the image field when no new file is uploaded.
    Edit { current_image: Option<ImageRef> },
}

/// Raw values as received from the client (e.g. a POST body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedFile>,
}

impl ProductSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_image(mut self, file: UploadedFile) -> Self {
        self.image = Some(file);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    upload_prefix: String,
}

impl ProductForm {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            upload_prefix: CatalogConfig::default().upload_prefix,
        }
    }

    pub fn create() -> Self {
        Self::new(FormMode::Create)
    }

    pub fn edit(current_image: Option<ImageRef>) -> Self {
        Self::new(FormMode::Edit { current_image })
    }

    pub fn with_config(mut self, config: &CatalogConfig) -> Self {
        self.upload_prefix = config.upload_prefix.clone();
        self
    }

    /// Validate every field and either return the cleaned record or all field errors.
    ///
    /// `today` dates the upload directory of a newly submitted image. Nothing is
    /// persisted and no file is touched.
    pub fn validate<L>(
        &self,
        submission: &ProductSubmission,
        categories: &L,
        today: NaiveDate,
    ) -> Result<ProductFields, ValidationErrors>
    where
        L: CategoryLookup + ?Sized,
    {
        let mut errors = ValidationErrors::new();

        let name = clean_text(&mut errors, "name", submission.get("name"), product::NAME_MAX_LEN);
        let slug = clean_slug(&mut errors, "slug", submission.get("slug"), product::SLUG_MAX_LEN);
        let category = clean_category(&mut errors, submission.get("category"), categories);
        let description = clean_text(&mut errors, "description", submission.get("description"), usize::MAX);
        let price = clean_price(&mut errors, submission.get("price"));
        let rent_duration = clean_rent_duration(&mut errors, submission.get("rent_duration"));
        let image = self.clean_image(&mut errors, submission.image.as_ref(), today);

        if !errors.is_empty() {
            tracing::debug!(mode = ?self.mode, fields = ?errors.fields(), "product form rejected");
            return Err(errors);
        }

        match (name, slug, category, description, price, rent_duration, image) {
            (Some(name), Some(slug), Some(category), Some(description), Some(price), Some(rent_duration), Some(image)) => {
                Ok(ProductFields {
                    name,
                    slug,
                    category,
                    description,
                    price,
                    rent_duration,
                    image: Some(image),
                })
            }
            // Every `None` above reported an error.
            _ => Err(errors),
        }
    }

    fn clean_image(
        &self,
        errors: &mut ValidationErrors,
        upload: Option<&UploadedFile>,
        today: NaiveDate,
    ) -> Option<ImageRef> {
        match (upload, &self.mode) {
            (Some(file), _) => match file.check() {
                Ok(()) => Some(image::upload_path(&self.upload_prefix, today, file)),
                Err(e) => {
                    errors.add("image", e.to_string());
                    None
                }
            },
            (None, FormMode::Edit { current_image: Some(current) }) => Some(current.clone()),
            (None, _) => {
                errors.add("image", REQUIRED);
                None
            }
        }
    }
}

/// Trimmed, required, length-bounded text.
pub(crate) fn clean_text(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    max: usize,
) -> Option<String> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    let len = value.chars().count();
    if len > max {
        errors.add(field, format!("Ensure this value has at most {max} characters (it has {len})."));
        return None;
    }
    Some(value.to_string())
}

pub(crate) fn clean_slug(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    max: usize,
) -> Option<Slug> {
    match Slug::parse_with_max(raw.unwrap_or(""), max) {
        Ok(slug) => Some(slug),
        Err(e) => {
            errors.add(field, e.to_string());
            None
        }
    }
}

fn clean_category<L>(errors: &mut ValidationErrors, raw: Option<&str>, categories: &L) -> Option<CategoryId>
where
    L: CategoryLookup + ?Sized,
{
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        errors.add("category", REQUIRED);
        return None;
    }
    match value.parse::<CategoryId>() {
        Ok(id) if categories.category_exists(id) => Some(id),
        _ => {
            errors.add("category", INVALID_CATEGORY);
            None
        }
    }
}

fn clean_price(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<Price> {
    match Price::parse(raw.unwrap_or("")) {
        Ok(price) => Some(price),
        Err(e) => {
            errors.add("price", e.to_string());
            None
        }
    }
}

fn clean_rent_duration(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<RentDuration> {
    let value = raw.map(str::trim).unwrap_or("");
    if value.is_empty() {
        errors.add("rent_duration", REQUIRED);
        return None;
    }
    match value.parse::<RentDuration>() {
        Ok(d) => Some(d),
        Err(e) => {
            errors.add("rent_duration", e.to_string());
            None
        }
    }
}
