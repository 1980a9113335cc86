//! Documents - Typed records persisted in a collection of a document store.
//!
//! ## Example
//!
//! ```ignore
//! use docgate::Document;
//!
//! #[derive(Clone, Debug, Serialize, Deserialize, Document)]
//! #[document(collection = "products", name = "Product")]
//! struct Product {
//!     #[document(id)]
//!     pub id: String,
//!     pub name: String,
//!     #[serde(with = "docgate::number")]
//!     pub price: f64,
//!     pub category: String,
//! }
//! ```

pub mod number;

use serde::{de::DeserializeOwned, Serialize};

use crate::schema::Schema;

/// Types with a declared shape that the validator can check.
pub trait Schematic {
    fn schema() -> &'static Schema;
}

/// Trait for types that can be stored as documents.
pub trait Document: Schematic + Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection name for this document type (e.g., "products", "students").
    /// Maps to a collection in MongoDB, a table in SQL, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Singular display name used in response messages (e.g., "Product").
    const NAME: &'static str;

    /// Serialized name of the store-assigned identifier field.
    const ID_FIELD: &'static str;

    /// Returns the unique identifier for this document instance.
    fn id(&self) -> &str;
}
