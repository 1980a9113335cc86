//! Product gateway: create, list, update and delete semantics.

use docgate::domains::products::Product;
use docgate::{FieldErrorKind, GatewayError, StoreError};
use serde_json::json;

use crate::support::{lamp, product_gateway};

#[test]
fn created_product_is_listed_verbatim() {
    let gateway = product_gateway();

    let created = gateway.create(lamp()).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Desk Lamp");
    assert_eq!(created.price, 1299.5);
    assert_eq!(created.category, "Home");

    let listed = gateway.list_all().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn each_create_gets_a_distinct_id() {
    let gateway = product_gateway();
    let a = gateway.create(lamp()).unwrap();
    let b = gateway.create(lamp()).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(gateway.list_all().unwrap().len(), 2);
}

#[test]
fn list_on_empty_collection_is_empty() {
    let gateway = product_gateway();
    assert!(gateway.list_all().unwrap().is_empty());
}

#[test]
fn missing_required_field_creates_nothing() {
    let gateway = product_gateway();
    gateway.create(lamp()).unwrap();

    let err = gateway
        .create(json!({ "name": "Chair", "price": 40 }))
        .unwrap_err();
    match &err {
        GatewayError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.has_field("category"));
            assert_eq!(errors.errors()[0].kind, FieldErrorKind::Missing);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().starts_with("Product validation failed"));
    assert_eq!(gateway.list_all().unwrap().len(), 1);
}

#[test]
fn wrong_type_is_rejected() {
    let gateway = product_gateway();
    let err = gateway
        .create(json!({ "name": "Chair", "price": "forty", "category": "Home" }))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(gateway.list_all().unwrap().is_empty());
}

#[test]
fn unknown_fields_are_rejected() {
    let gateway = product_gateway();
    let mut body = lamp();
    body["colour"] = json!("red");

    let err = gateway.create(body).unwrap_err();
    match err {
        GatewayError::Validation(errors) => {
            assert!(errors.has_field("colour"));
            assert_eq!(errors.errors()[0].kind, FieldErrorKind::Unknown);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn caller_cannot_choose_the_id() {
    let gateway = product_gateway();
    let mut body = lamp();
    body["id"] = json!("mine");

    let err = gateway.create(body).unwrap_err();
    match err {
        GatewayError::Validation(errors) => {
            assert_eq!(errors.errors()[0].kind, FieldErrorKind::Immutable);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(gateway.list_all().unwrap().is_empty());
}

#[test]
fn non_object_body_is_rejected() {
    let gateway = product_gateway();
    let err = gateway.create(json!(["Desk Lamp"])).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn partial_update_keeps_unspecified_fields() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();

    let updated = gateway
        .update_by_id(&created.id, json!({ "price": 999 }))
        .unwrap();
    assert_eq!(
        updated,
        Product {
            id: created.id.clone(),
            name: "Desk Lamp".into(),
            price: 999.0,
            category: "Home".into(),
        }
    );

    let fetched = gateway.get_by_id(&created.id).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();

    let err = gateway
        .update_by_id("does-not-exist", json!({ "price": 1 }))
        .unwrap_err();
    assert_eq!(err, GatewayError::not_found("Product", "does-not-exist"));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Product not found");
    assert_eq!(gateway.list_all().unwrap(), vec![created]);
}

#[test]
fn invalid_update_leaves_record_unchanged() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();

    let err = gateway
        .update_by_id(&created.id, json!({ "name": null, "price": 5 }))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(gateway.get_by_id(&created.id).unwrap(), created);

    let err = gateway
        .update_by_id(&created.id, json!({ "id": "other" }))
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(gateway.get_by_id(&created.id).unwrap(), created);
}

#[test]
fn delete_removes_exactly_one_record() {
    let gateway = product_gateway();
    let keep = gateway.create(lamp()).unwrap();
    let drop = gateway
        .create(json!({ "name": "Stool", "price": 15, "category": "Home" }))
        .unwrap();

    let removed = gateway.delete_by_id(&drop.id).unwrap();
    assert_eq!(removed, drop);
    assert_eq!(gateway.list_all().unwrap(), vec![keep]);

    let err = gateway.delete_by_id(&drop.id).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn delete_of_unknown_id_is_not_found() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();

    let err = gateway.delete_by_id("does-not-exist").unwrap_err();
    assert_eq!(err, GatewayError::not_found("Product", "does-not-exist"));
    assert_eq!(err.status_code(), 404);
    assert_eq!(gateway.list_all().unwrap(), vec![created]);
}

#[test]
fn listed_prices_match_submitted_json() {
    let gateway = product_gateway();

    for body in [
        json!({ "name": "Lamp", "price": 25, "category": "Home" }),
        json!({ "name": "Rug", "price": 25.75, "category": "Home" }),
    ] {
        let created = gateway.create(body.clone()).unwrap();
        let listed = gateway
            .list_all()
            .unwrap()
            .into_iter()
            .find(|p| p.id == created.id)
            .unwrap();
        let listed = serde_json::to_value(&listed).unwrap();
        assert_eq!(listed["price"], body["price"]);
        assert_eq!(listed["name"], body["name"]);
        assert_eq!(listed["category"], body["category"]);
    }
}

#[test]
fn get_of_unknown_id_is_not_found() {
    let gateway = product_gateway();
    assert_eq!(gateway.get_by_id("nope").unwrap_err().status_code(), 404);
}

#[test]
fn closed_store_surfaces_as_store_error() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();
    gateway.store().close();

    let err = gateway.list_all().unwrap_err();
    assert!(matches!(err, GatewayError::Store(StoreError::Closed { .. })));
    assert_eq!(err.status_code(), 500);
    assert_eq!(gateway.delete_by_id(&created.id).unwrap_err().status_code(), 500);
    assert_eq!(gateway.create(lamp()).unwrap_err().status_code(), 500);
}
