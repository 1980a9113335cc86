//! Catalog demo: nested-document queries over the sample products.

use docgate::domains::catalog::{
    self, by_category, run_demo, sample_products, with_variant_color, CatalogProduct, Variant,
};
use docgate::{DocumentStore, Gateway, InMemoryDocumentStore};
use serde_json::json;

fn seeded_store() -> InMemoryDocumentStore {
    let store = InMemoryDocumentStore::open(catalog::DATABASE).unwrap();
    store.insert_many(&sample_products()).unwrap();
    store
}

fn names(products: &[CatalogProduct]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn electronics_returns_only_the_phone() {
    let store = seeded_store();
    let electronics = by_category(&store, "Electronics").unwrap();
    assert_eq!(names(&electronics), vec!["Smartphone X1"]);
}

#[test]
fn blue_variants_match_phone_and_shirt() {
    let store = seeded_store();
    let blue = with_variant_color(&store, "Blue").unwrap();
    let mut found = names(&blue);
    found.sort();
    assert_eq!(found, vec!["Cotton T-Shirt", "Smartphone X1"]);
}

#[test]
fn projection_keeps_name_color_and_stock_only() {
    let store = seeded_store();
    let projected = catalog::variant_projection(&store).unwrap();

    assert_eq!(projected.len(), 3);
    let shoes = projected
        .iter()
        .find(|p| p["name"] == "Running Shoes")
        .unwrap();
    assert_eq!(
        shoes,
        &json!({
            "name": "Running Shoes",
            "variants": [
                { "color": "Red", "stock": 15 },
                { "color": "Black", "stock": 25 }
            ]
        })
    );
    for doc in &projected {
        let obj = doc.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("price"));
        assert!(!obj.contains_key("category"));
    }
}

#[test]
fn demo_run_is_repeatable() {
    let store = seeded_store();

    let report = run_demo(&store).unwrap();
    assert_eq!(report.cleared, 3);
    assert_eq!(report.inserted, 3);
    assert_eq!(report.all.len(), 3);
    assert_eq!(names(&report.all), vec!["Smartphone X1", "Running Shoes", "Cotton T-Shirt"]);
    assert_eq!(names(&report.electronics), vec!["Smartphone X1"]);
    assert_eq!(report.variant_projection.len(), 3);
    assert_eq!(report.blue_variants.len(), 2);

    let again = run_demo(&store).unwrap();
    assert_eq!(again.cleared, 3);
    assert_eq!(store.count::<CatalogProduct>().unwrap(), 3);
}

#[test]
fn catalog_products_go_through_the_gateway() {
    let gateway = Gateway::<_, CatalogProduct>::new(InMemoryDocumentStore::new());

    let created = gateway
        .create(json!({ "name": "Mug", "price": 9.5, "category": "Kitchen" }))
        .unwrap();
    assert!(created.variants.is_empty());

    let updated = gateway
        .update_by_id(
            &created.id,
            json!({ "variants": [{ "color": "Blue" }, { "size": "XL", "stock": 4 }] }),
        )
        .unwrap();
    assert_eq!(
        updated.variants,
        vec![
            Variant {
                color: Some("Blue".into()),
                ..Variant::default()
            },
            Variant {
                size: Some("XL".into()),
                stock: Some(4),
                ..Variant::default()
            },
        ]
    );
    assert_eq!(updated.name, "Mug");

    let found = with_variant_color(gateway.store(), "Blue").unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn malformed_variant_is_rejected() {
    let gateway = Gateway::<_, CatalogProduct>::new(InMemoryDocumentStore::new());
    let err = gateway
        .create(json!({
            "name": "Mug",
            "price": 9.5,
            "category": "Kitchen",
            "variants": [{ "color": "Blue", "stock": "lots" }]
        }))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("variants.0.stock"));
    assert!(gateway.list_all().unwrap().is_empty());
}

#[test]
fn null_variants_are_stored_as_empty() {
    let gateway = Gateway::<_, CatalogProduct>::new(InMemoryDocumentStore::new());

    let created = gateway
        .create(json!({
            "name": "Mug",
            "price": 9.5,
            "category": "Kitchen",
            "variants": null
        }))
        .unwrap();
    assert!(created.variants.is_empty());

    let with_variants = gateway
        .update_by_id(&created.id, json!({ "variants": [{ "color": "Blue" }] }))
        .unwrap();
    assert_eq!(with_variants.variants.len(), 1);

    let cleared = gateway
        .update_by_id(&created.id, json!({ "variants": null }))
        .unwrap();
    assert!(cleared.variants.is_empty());
    assert_eq!(gateway.list_all().unwrap(), vec![cleared]);
}
