//! gateway — One CRUD operation per verb, each a single call against a store.
//!
//! A `Gateway<S, D>` owns an injected store client `S` and serves documents of
//! type `D`. It keeps no state of its own between requests; everything lives
//! in the store.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docgate::{Gateway, GatewayRequest, InMemoryDocumentStore};
//! use docgate::domains::products::{self, Product};
//! use serde_json::json;
//!
//! let store = InMemoryDocumentStore::open(products::DATABASE)?;
//! let gateway = Gateway::<_, Product>::new(store);
//!
//! // Direct calls
//! let lamp = gateway.create(json!({ "name": "Lamp", "price": 20, "category": "Home" }))?;
//!
//! // Dispatch with HTTP-equivalent status codes
//! let response = gateway.dispatch(GatewayRequest::ListAll);
//! assert_eq!(response.status, 200);
//!
//! // HTTP transport (requires "http" feature)
//! // docgate::gateway::serve(docgate::gateway::router(Arc::new(gateway)), addr, shutdown).await?;
//! ```

mod dispatch;
mod error;
mod service;

pub use dispatch::{GatewayRequest, GatewayResponse};
pub use error::GatewayError;
pub use service::Gateway;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{health_router, router, serve};
