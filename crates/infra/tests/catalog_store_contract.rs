//! Contract tests for the catalog persistence boundary, run against the
//! in-memory store.

use std::sync::Arc;

use rentshop_catalog::{
    ImageRef, NewCategory, Price, ProductFields, RentDuration, Slug,
};
use rentshop_core::{CategoryId, ProductId, UserId};
use rentshop_infra::{CatalogStore, InMemoryCatalogStore, StoreError};

fn category(name: &str, slug: &str) -> NewCategory {
    NewCategory::validate(name, slug).unwrap()
}

fn fields(category: CategoryId, name: &str, slug: &str) -> ProductFields {
    ProductFields::new(
        name,
        Slug::parse(slug).unwrap(),
        category,
        "",
        Price::parse("12.50").unwrap(),
        RentDuration::OneDay,
        Some(ImageRef::new("products/2024/01/01/item.jpg")),
    )
    .unwrap()
}

fn store() -> InMemoryCatalogStore {
    rentshop_observability::init();
    InMemoryCatalogStore::new()
}

#[test]
fn category_slugs_are_unique() {
    let store = store();
    store.insert_category(category("Tools", "tools")).unwrap();

    let err = store.insert_category(category("Other Tools", "tools")).unwrap_err();

    assert_eq!(err, StoreError::DuplicateSlug(Slug::parse("tools").unwrap()));
    assert_eq!(store.list_categories().unwrap().len(), 1);
}

#[test]
fn rename_cannot_steal_another_slug() {
    let store = store();
    store.insert_category(category("Tools", "tools")).unwrap();
    let bikes = store.insert_category(category("Bikes", "bikes")).unwrap();

    let err = store
        .rename_category(bikes.id_typed(), category("Bikes", "tools"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug(_)));

    // Keeping its own slug is fine.
    let renamed = store
        .rename_category(bikes.id_typed(), category("Bicycles", "bikes"))
        .unwrap();
    assert_eq!(renamed.name(), "Bicycles");
    assert_eq!(renamed.created_at(), bikes.created_at());
    assert!(renamed.updated_at() >= bikes.updated_at());
}

#[test]
fn product_slugs_may_repeat() {
    let store = store();
    let tools = store.insert_category(category("Tools", "tools")).unwrap();
    let owner = UserId::new();

    let a = store.insert_product(owner, fields(tools.id_typed(), "Drill", "drill")).unwrap();
    let b = store.insert_product(owner, fields(tools.id_typed(), "Drill", "drill")).unwrap();

    assert_ne!(a.id_typed(), b.id_typed());
    let slug = Slug::parse("drill").unwrap();
    assert_eq!(store.product_by_key(a.id_typed(), &slug), Ok(Some(a.clone())));
    assert_eq!(store.product_by_key(b.id_typed(), &slug), Ok(Some(b)));
    assert_eq!(store.product_by_key(a.id_typed(), &Slug::parse("saw").unwrap()), Ok(None));
}

#[test]
fn deleting_a_category_cascades_to_its_products() {
    let store = store();
    let tools = store.insert_category(category("Tools", "tools")).unwrap();
    let bikes = store.insert_category(category("Bikes", "bikes")).unwrap();
    let owner = UserId::new();

    let drill = store.insert_product(owner, fields(tools.id_typed(), "Drill", "drill")).unwrap();
    let saw = store.insert_product(owner, fields(tools.id_typed(), "Saw", "saw")).unwrap();
    let bmx = store.insert_product(owner, fields(bikes.id_typed(), "BMX", "bmx")).unwrap();

    let mut removed = store.delete_category(tools.id_typed()).unwrap();
    removed.sort();
    let mut expected = vec![drill.id_typed(), saw.id_typed()];
    expected.sort();

    assert_eq!(removed, expected);
    assert_eq!(store.get_category(tools.id_typed()), Ok(None));
    assert!(store.products_in_category(tools.id_typed()).unwrap().is_empty());
    assert_eq!(store.list_products(), Ok(vec![bmx]));
}

#[test]
fn deleting_an_owner_cascades_to_their_products() {
    let store = store();
    let tools = store.insert_category(category("Tools", "tools")).unwrap();
    let alice = UserId::new();
    let bob = UserId::new();

    store.insert_product(alice, fields(tools.id_typed(), "Drill", "drill")).unwrap();
    let ladder = store.insert_product(bob, fields(tools.id_typed(), "Ladder", "ladder")).unwrap();

    let removed = store.delete_owner_products(alice).unwrap();

    assert_eq!(removed.len(), 1);
    assert!(store.products_of_owner(alice).unwrap().is_empty());
    assert_eq!(store.list_products(), Ok(vec![ladder]));
}

#[test]
fn products_require_an_existing_category() {
    let store = store();
    let ghost = CategoryId::new();

    let err = store
        .insert_product(UserId::new(), fields(ghost, "Drill", "drill"))
        .unwrap_err();

    assert_eq!(err, StoreError::MissingCategory(ghost));
}

#[test]
fn listings_use_natural_ordering() {
    let store = store();
    store.insert_category(category("Tools", "tools")).unwrap();
    let bikes = store.insert_category(category("Bikes", "bikes")).unwrap();
    store.insert_category(category("Cameras", "cameras")).unwrap();

    let names: Vec<String> = store
        .list_categories()
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, vec!["Bikes", "Cameras", "Tools"]);

    let owner = UserId::new();
    for (name, slug) in [("Tandem", "tandem"), ("BMX", "bmx"), ("Cruiser", "cruiser")] {
        store.insert_product(owner, fields(bikes.id_typed(), name, slug)).unwrap();
    }
    let names: Vec<String> = store
        .products_in_category(bikes.id_typed())
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, vec!["BMX", "Cruiser", "Tandem"]);
}

#[test]
fn timestamps_are_assigned_by_the_store() {
    let store = store();
    let tools = store.insert_category(category("Tools", "tools")).unwrap();
    let product = store
        .insert_product(UserId::new(), fields(tools.id_typed(), "Drill", "drill"))
        .unwrap();
    assert_eq!(product.created_at(), product.updated_at());

    let updated = store.set_product_available(product.id_typed(), false).unwrap();
    assert!(!updated.is_available());
    assert_eq!(updated.created_at(), product.created_at());
    assert!(updated.updated_at() >= product.updated_at());
}

#[test]
fn missing_records_are_reported() {
    let store = store();
    let product_id = ProductId::new();
    let category_id = CategoryId::new();

    assert_eq!(store.delete_product(product_id), Err(StoreError::ProductNotFound(product_id)));
    assert_eq!(
        store.delete_category(category_id),
        Err(StoreError::CategoryNotFound(category_id))
    );
    assert_eq!(
        store.rename_category(category_id, category("Tools", "tools")).unwrap_err(),
        StoreError::CategoryNotFound(category_id)
    );
}

#[test]
fn category_lookup_by_slug() {
    let store = store();
    let tools = store.insert_category(category("Tools", "tools")).unwrap();

    assert_eq!(store.category_by_slug(&Slug::parse("tools").unwrap()), Ok(Some(tools.clone())));
    assert_eq!(tools.absolute_path(), "/category/tools/");
    assert_eq!(store.category_by_slug(&Slug::parse("bikes").unwrap()), Ok(None));
}

#[test]
fn shared_store_behind_arc() {
    let store = Arc::new(store());
    let shared = Arc::clone(&store);
    let tools = shared.insert_category(category("Tools", "tools")).unwrap();

    assert_eq!(CatalogStore::get_category(&store, tools.id_typed()), Ok(Some(tools)));
}

#[test]
fn rename_of_unknown_category_is_not_found_even_with_taken_slug() {
    let store = store();
    store.insert_category(category("Tools", "tools")).unwrap();
    let ghost = CategoryId::new();

    let err = store.rename_category(ghost, category("Tools", "tools")).unwrap_err();

    assert_eq!(err, StoreError::CategoryNotFound(ghost));
}

#[test]
fn records_over_stored_limits_cannot_be_built() {
    let long_name = "x".repeat(101);
    let errors = ProductFields::new(
        &long_name,
        Slug::parse("drill").unwrap(),
        CategoryId::new(),
        "",
        Price::parse("1").unwrap(),
        RentDuration::OneDay,
        None,
    )
    .unwrap_err();
    assert!(errors.has("name"));

    let errors = NewCategory::validate("Tools", &"t".repeat(400)).unwrap_err();
    assert!(errors.has("slug"));
}
