//! Category: a named, slugged taxonomy node that products belong to.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentshop_core::{CategoryId, Entity, Timestamps, ValidationErrors};

use crate::form::{clean_slug, clean_text};
use crate::routes;
use crate::slug::Slug;

pub const NAME_MAX_LEN: usize = 150;
pub const SLUG_MAX_LEN: usize = 150;

/// Validated input for creating or renaming a category.
///
/// Only obtainable through [`NewCategory::validate`], so a store never sees an
/// empty name or an over-long slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    name: String,
    slug: Slug,
}

impl NewCategory {
    /// Validate raw `name`/`slug` text, reporting every offending field.
    ///
    /// Slug uniqueness is not checked here; the store enforces it.
    pub fn validate(name: &str, slug: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = clean_text(&mut errors, "name", Some(name), NAME_MAX_LEN);
        let slug = clean_slug(&mut errors, "slug", Some(slug), SLUG_MAX_LEN);

        match (name, slug) {
            (Some(name), Some(slug)) => errors.into_result(Self { name, slug }),
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    slug: Slug,
    timestamps: Timestamps,
}

impl Category {
    pub const VERBOSE_NAME: &'static str = "category";
    pub const VERBOSE_NAME_PLURAL: &'static str = "categories";

    pub fn create(id: CategoryId, input: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            slug: input.slug,
            timestamps: Timestamps::created(now),
        }
    }

    /// Replace name and slug.
    pub fn rename(&mut self, input: NewCategory, now: DateTime<Utc>) {
        self.name = input.name;
        self.slug = input.slug;
        self.timestamps.touch(now);
    }

    pub fn id_typed(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }

    /// Listing path for this category's products.
    pub fn absolute_path(&self) -> String {
        routes::category_list(&self.slug)
    }

    /// Natural ordering: by name, ties broken by id so listings are stable.
    pub fn natural_order(a: &Self, b: &Self) -> Ordering {
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tools() -> Category {
        let input = NewCategory::validate("Tools", "tools").unwrap();
        Category::create(CategoryId::new(), input, Utc::now())
    }

    #[test]
    fn validate_trims_and_accepts() {
        let input = NewCategory::validate("  Camping Gear ", " camping-gear ").unwrap();
        assert_eq!(input.name(), "Camping Gear");
        assert_eq!(input.slug().as_str(), "camping-gear");
    }

    #[test]
    fn validate_reports_each_field() {
        let errors = NewCategory::validate("", "not a slug").unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "slug"]);
    }

    #[test]
    fn validate_enforces_name_length() {
        let errors = NewCategory::validate(&"x".repeat(151), "ok").unwrap_err();
        assert!(errors.has("name"));
        assert!(NewCategory::validate(&"x".repeat(150), "ok").is_ok());
    }

    #[test]
    fn validate_enforces_slug_length() {
        let errors = NewCategory::validate("Tools", &"a".repeat(400)).unwrap_err();
        assert_eq!(errors.fields(), vec!["slug"]);
        assert!(NewCategory::validate("Tools", &"a".repeat(150)).is_ok());
    }

    #[test]
    fn absolute_path_uses_slug() {
        assert_eq!(tools().absolute_path(), "/category/tools/");
    }

    #[test]
    fn display_is_name() {
        assert_eq!(tools().to_string(), "Tools");
    }

    #[test]
    fn rename_touches_updated_at_only() {
        let mut category = tools();
        let created = category.created_at();
        let later = created + Duration::seconds(1);
        category.rename(NewCategory::validate("Power Tools", "power-tools").unwrap(), later);

        assert_eq!(category.name(), "Power Tools");
        assert_eq!(category.absolute_path(), "/category/power-tools/");
        assert_eq!(category.created_at(), created);
        assert_eq!(category.updated_at(), later);
    }

    #[test]
    fn natural_order_sorts_by_name() {
        let now = Utc::now();
        let mut all = vec![
            Category::create(CategoryId::new(), NewCategory::validate("Tools", "tools").unwrap(), now),
            Category::create(CategoryId::new(), NewCategory::validate("Bikes", "bikes").unwrap(), now),
            Category::create(CategoryId::new(), NewCategory::validate("Cameras", "cameras").unwrap(), now),
        ];
        all.sort_by(Category::natural_order);
        let names: Vec<_> = all.iter().map(Category::name).collect();
        assert_eq!(names, vec!["Bikes", "Cameras", "Tools"]);
    }
}
