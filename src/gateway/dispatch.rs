//! Transport-agnostic request/response types for gateway dispatch.
//!
//! These types bridge HTTP frameworks and the `Gateway` operations: each
//! request variant maps to one operation and each outcome to an HTTP-style
//! status code and JSON body.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use super::error::GatewayError;
use super::service::Gateway;
use crate::document::Document;
use crate::store::DocumentStore;

/// An inbound gateway request, one variant per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GatewayRequest {
    Create { body: Value },
    ListAll,
    Get { id: String },
    Update { id: String, body: Value },
    Delete { id: String },
}

/// The response returned after dispatching a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (document(s), confirmation message, or error).
    pub body: Value,
}

impl GatewayResponse {
    /// Build a 201 response carrying the created document.
    pub fn created<D: Document>(document: &D) -> Self {
        Self {
            status: 201,
            body: json!({
                "message": format!("{} created successfully!", D::NAME),
                "record": document,
            }),
        }
    }

    /// Build a 200 response carrying a JSON value as-is.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Build a 200 response carrying the post-update document.
    pub fn updated<D: Document>(document: &D) -> Self {
        Self::ok(json!({
            "message": format!("{} updated successfully!", D::NAME),
            "updated": document,
        }))
    }

    /// Build a 200 response confirming removal.
    pub fn deleted<D: Document>() -> Self {
        Self::ok(json!({ "message": format!("{} deleted successfully!", D::NAME) }))
    }

    /// Build an error response from a `GatewayError`.
    pub fn from_error(err: GatewayError) -> Self {
        let status = err.status_code();
        if status >= 500 {
            error!(error = %err, "store call failed");
        }
        Self {
            status,
            body: json!({ "error": err.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<GatewayError> for GatewayResponse {
    fn from(err: GatewayError) -> Self {
        Self::from_error(err)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::Store(e.into()))
}

impl<S: DocumentStore, D: Document> Gateway<S, D> {
    /// Run one request and translate its outcome into a status and body.
    ///
    /// Failures never escape: every error becomes an error response.
    pub fn dispatch(&self, request: GatewayRequest) -> GatewayResponse {
        let result = match request {
            GatewayRequest::Create { body } => {
                self.create(body).map(|doc| GatewayResponse::created(&doc))
            }
            GatewayRequest::ListAll => self
                .list_all()
                .and_then(|docs| to_body(&docs))
                .map(GatewayResponse::ok),
            GatewayRequest::Get { id } => self
                .get_by_id(&id)
                .and_then(|doc| to_body(&doc))
                .map(GatewayResponse::ok),
            GatewayRequest::Update { id, body } => self
                .update_by_id(&id, body)
                .map(|doc| GatewayResponse::updated(&doc)),
            GatewayRequest::Delete { id } => self
                .delete_by_id(&id)
                .map(|_| GatewayResponse::deleted::<D>()),
        };

        result.unwrap_or_else(GatewayResponse::from_error)
    }
}
