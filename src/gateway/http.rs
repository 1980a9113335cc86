//! HTTP transport for gateways — maps REST routes to gateway dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! For a document type with collection `{c}`:
//!
//! - `POST /{c}` — create. 201 `{ message, record }` or 400 `{ error }`.
//! - `GET /{c}` — list all. 200 `[...]` or 500 `{ error }`.
//! - `GET /{c}/:id` — fetch one. 200 or 404.
//! - `PUT /{c}/:id` — partial update. 200 `{ message, updated }`, 400 or 404.
//! - `DELETE /{c}/:id` — delete. 200 `{ message }`, 404 or 500.
//!
//! `health_router` adds `GET /health` returning `{ "ok": true, "collections": [...] }`.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::dispatch::{GatewayRequest, GatewayResponse};
use super::service::Gateway;
use crate::document::Document;
use crate::store::DocumentStore;

type SharedGateway<S, D> = Arc<Gateway<S, D>>;

/// Build an axum `Router` exposing CRUD routes for one document type.
pub fn router<S, D>(gateway: SharedGateway<S, D>) -> Router
where
    S: DocumentStore + 'static,
    D: Document,
{
    let collection = format!("/{}", D::COLLECTION);
    let item = format!("/{}/:id", D::COLLECTION);

    Router::new()
        .route(
            &collection,
            get(list_handler::<S, D>).post(create_handler::<S, D>),
        )
        .route(
            &item,
            get(get_handler::<S, D>)
                .put(update_handler::<S, D>)
                .delete(delete_handler::<S, D>),
        )
        .with_state(gateway)
}

/// `GET /health` listing the mounted collections.
pub fn health_router(collections: &[&str]) -> Router {
    let collections: Vec<String> = collections.iter().map(|c| c.to_string()).collect();
    Router::new().route(
        "/health",
        get(move || {
            let collections = collections.clone();
            async move { Json(json!({ "ok": true, "collections": collections })) }
        }),
    )
}

/// Serve `app` at `addr` until `shutdown` resolves.
pub async fn serve<F>(app: Router, addr: SocketAddr, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

/// Malformed JSON never reaches the gateway; it is answered with 400 `{ error }`.
fn bad_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": rejection.body_text() })),
    )
        .into_response()
}

async fn create_handler<S: DocumentStore + 'static, D: Document>(
    State(gateway): State<SharedGateway<S, D>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(body)) => gateway
            .dispatch(GatewayRequest::Create { body })
            .into_response(),
        Err(rejection) => bad_body(rejection),
    }
}

async fn list_handler<S: DocumentStore + 'static, D: Document>(
    State(gateway): State<SharedGateway<S, D>>,
) -> Response {
    gateway.dispatch(GatewayRequest::ListAll).into_response()
}

async fn get_handler<S: DocumentStore + 'static, D: Document>(
    State(gateway): State<SharedGateway<S, D>>,
    Path(id): Path<String>,
) -> Response {
    gateway.dispatch(GatewayRequest::Get { id }).into_response()
}

async fn update_handler<S: DocumentStore + 'static, D: Document>(
    State(gateway): State<SharedGateway<S, D>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(body)) => gateway
            .dispatch(GatewayRequest::Update { id, body })
            .into_response(),
        Err(rejection) => bad_body(rejection),
    }
}

async fn delete_handler<S: DocumentStore + 'static, D: Document>(
    State(gateway): State<SharedGateway<S, D>>,
    Path(id): Path<String>,
) -> Response {
    gateway.dispatch(GatewayRequest::Delete { id }).into_response()
}
