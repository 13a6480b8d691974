//! Product: a rentable catalog item owned by a user.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentshop_core::{CategoryId, Entity, ProductId, Timestamps, UserId, ValidationErrors};

use crate::form::{clean_slug, clean_text};

use crate::image::ImageRef;
use crate::price::Price;
use crate::rent_duration::RentDuration;
use crate::routes;
use crate::slug::Slug;

pub const NAME_MAX_LEN: usize = 100;
pub const SLUG_MAX_LEN: usize = 100;

/// User-editable product fields, as produced by the product form.
///
/// Built either by [`crate::ProductForm`] or by [`ProductFields::new`]; both
/// enforce the name and slug limits, so a store can take these as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFields {
    pub(crate) name: String,
    pub(crate) slug: Slug,
    pub(crate) category: CategoryId,
    pub(crate) description: String,
    pub(crate) price: Price,
    pub(crate) rent_duration: RentDuration,
    pub(crate) image: Option<ImageRef>,
}

impl ProductFields {
    /// Assemble fields outside the form (imports, admin tools).
    ///
    /// Applies the stored-record constraints: name required and at most
    /// `NAME_MAX_LEN` characters, slug at most `SLUG_MAX_LEN`. Unlike the form,
    /// description and image may be empty here.
    pub fn new(
        name: &str,
        slug: Slug,
        category: CategoryId,
        description: &str,
        price: Price,
        rent_duration: RentDuration,
        image: Option<ImageRef>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = clean_text(&mut errors, "name", Some(name), NAME_MAX_LEN);
        let slug = clean_slug(&mut errors, "slug", Some(slug.as_str()), SLUG_MAX_LEN);

        match (name, slug) {
            (Some(name), Some(slug)) => errors.into_result(Self {
                name,
                slug,
                category,
                description: description.trim().to_string(),
                price,
                rent_duration,
                image,
            }),
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn rent_duration(&self) -> RentDuration {
        self.rent_duration
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    owner: UserId,
    category: CategoryId,
    name: String,
    slug: Slug,
    description: String,
    price: Price,
    available: bool,
    rent_duration: RentDuration,
    image: Option<ImageRef>,
    timestamps: Timestamps,
}

impl Product {
    /// New listing owned by `owner`. Products start out available.
    pub fn create(id: ProductId, owner: UserId, fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            category: fields.category,
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            price: fields.price,
            available: true,
            rent_duration: fields.rent_duration,
            image: fields.image,
            timestamps: Timestamps::created(now),
        }
    }

    /// Overwrite the user-editable fields. Owner and availability are kept.
    pub fn apply_edit(&mut self, fields: ProductFields, now: DateTime<Utc>) {
        self.category = fields.category;
        self.name = fields.name;
        self.slug = fields.slug;
        self.description = fields.description;
        self.price = fields.price;
        self.rent_duration = fields.rent_duration;
        self.image = fields.image;
        self.timestamps.touch(now);
    }

    pub fn set_available(&mut self, available: bool, now: DateTime<Utc>) {
        self.available = available;
        self.timestamps.touch(now);
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn rent_duration(&self) -> RentDuration {
        self.rent_duration
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }

    /// Current editable fields, e.g. to pre-fill an edit form.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            slug: self.slug.clone(),
            category: self.category,
            description: self.description.clone(),
            price: self.price,
            rent_duration: self.rent_duration,
            image: self.image.clone(),
        }
    }

    /// Composite lookup key. Product slugs are only unique together with the id.
    pub fn lookup_key(&self) -> (ProductId, &Slug) {
        (self.id, &self.slug)
    }

    /// Detail page path.
    pub fn absolute_path(&self) -> String {
        routes::product_detail(self.id, &self.slug)
    }

    /// Natural ordering: by name, ties broken by id.
    pub fn natural_order(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
