//! Dispatch: request variants map to status codes and JSON bodies.

use docgate::{GatewayRequest, GatewayResponse};
use serde_json::json;

use crate::support::{lamp, product_gateway};

#[test]
fn create_returns_201_with_record() {
    let gateway = product_gateway();

    let resp = gateway.dispatch(GatewayRequest::Create { body: lamp() });
    assert_eq!(resp.status, 201);
    assert!(resp.is_success());
    assert_eq!(resp.body["message"], "Product created successfully!");
    assert_eq!(resp.body["record"]["name"], "Desk Lamp");
    assert!(resp.body["record"]["id"].is_string());
}

#[test]
fn invalid_create_returns_400_with_error() {
    let gateway = product_gateway();

    let resp = gateway.dispatch(GatewayRequest::Create {
        body: json!({ "name": "Chair" }),
    });
    assert_eq!(resp.status, 400);
    let error = resp.body["error"].as_str().unwrap();
    assert!(error.contains("price"));
    assert!(error.contains("category"));
}

#[test]
fn list_returns_plain_array() {
    let gateway = product_gateway();
    assert_eq!(gateway.dispatch(GatewayRequest::ListAll), GatewayResponse::ok(json!([])));

    gateway.create(lamp()).unwrap();
    let resp = gateway.dispatch(GatewayRequest::ListAll);
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body.as_array().unwrap().len(), 1);
}

#[test]
fn update_and_delete_bodies() {
    let gateway = product_gateway();
    let created = gateway.create(lamp()).unwrap();

    let resp = gateway.dispatch(GatewayRequest::Update {
        id: created.id.clone(),
        body: json!({ "category": "Office" }),
    });
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["message"], "Product updated successfully!");
    assert_eq!(resp.body["updated"]["category"], "Office");
    assert_eq!(resp.body["updated"]["name"], "Desk Lamp");

    let resp = gateway.dispatch(GatewayRequest::Delete {
        id: created.id.clone(),
    });
    assert_eq!(
        resp,
        GatewayResponse::ok(json!({ "message": "Product deleted successfully!" }))
    );

    let resp = gateway.dispatch(GatewayRequest::Delete { id: created.id });
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, json!({ "error": "Product not found" }));
}

#[test]
fn closed_store_returns_500() {
    let gateway = product_gateway();
    gateway.store().close();

    let resp = gateway.dispatch(GatewayRequest::ListAll);
    assert_eq!(resp.status, 500);
    assert!(resp.body["error"].as_str().unwrap().contains("productDB"));
}

#[test]
fn requests_deserialize_from_tagged_json() {
    let request: GatewayRequest =
        serde_json::from_value(json!({ "op": "update", "id": "p1", "body": { "price": 3 } }))
            .unwrap();
    assert_eq!(
        request,
        GatewayRequest::Update {
            id: "p1".into(),
            body: json!({ "price": 3 }),
        }
    );

    let request: GatewayRequest = serde_json::from_value(json!({ "op": "list_all" })).unwrap();
    assert_eq!(request, GatewayRequest::ListAll);
}
