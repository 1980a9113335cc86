// Lets the derive macros name `docgate::...` from inside this crate too.
extern crate self as docgate;

mod document;
mod schema;
mod store;

pub mod domains;
pub mod gateway;

pub use document::{number, Document, Schematic};
pub use gateway::{Gateway, GatewayError, GatewayRequest, GatewayResponse};
pub use schema::{Field, FieldError, FieldErrorKind, FieldKind, Schema, ValidationErrors};
pub use store::{DocumentStore, Filter, InMemoryDocumentStore, Projection, StoreError};

// Re-export the derive macros alongside their traits
pub use docgate_macros::{Document, Schematic};
