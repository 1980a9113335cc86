//! Stores - Document databases the gateway talks to.
//!
//! A store is one logical database holding one collection per document type.
//! It is constructed once by the caller and handed to each gateway, which
//! never opens or re-opens a connection on its own.
//!
//! ## Example
//!
//! ```ignore
//! use docgate::{DocumentStore, Filter, InMemoryDocumentStore};
//!
//! let store = InMemoryDocumentStore::open("ecommerceDB")?;
//! store.insert_many(&sample_products())?;
//! let blue: Vec<CatalogProduct> = store.find_by(&Filter::eq("variants.color", "Blue"))?;
//! store.close();
//! ```

mod in_memory;
mod query;
mod store;

use std::fmt;

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store was closed; it is never re-opened implicitly.
    Closed { database: String },
    /// A lock guarding the storage was poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// A document with this id already exists in the collection.
    Duplicate { collection: String, id: String },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Closed { database } => {
                write!(f, "connection to database {} is closed", database)
            }
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Duplicate { collection, id } => {
                write!(f, "duplicate key: {}:{} already exists", collection, id)
            }
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "document storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use in_memory::InMemoryDocumentStore;
pub use query::{Filter, Projection};
pub use store::DocumentStore;
