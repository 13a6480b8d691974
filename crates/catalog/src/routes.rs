//! Canonical resource paths handed to the external router.

use rentshop_core::ProductId;

use crate::slug::Slug;

/// Path of the "products in this category" listing.
pub fn category_list(slug: &Slug) -> String {
    format!("/category/{slug}/")
}

/// Path of a product's detail page.
pub fn product_detail(id: ProductId, slug: &Slug) -> String {
    format!("/product/{id}/{slug}/")
}
