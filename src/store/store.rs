//! DocumentStore - Abstract storage for documents.

use serde_json::Value;

use super::{Filter, Projection, StoreError};
use crate::document::Document;

/// Abstract storage for documents, one collection per document type.
///
/// Every method is a single call against the store. Implementations must make
/// each call atomic with respect to the documents it touches.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Fails with `Duplicate` if the id is taken.
    fn insert_model<M: Document>(&self, model: &M) -> Result<M, StoreError>;

    /// Insert several documents in one call. Nothing is written if any id is taken.
    fn insert_many<M: Document>(&self, models: &[M]) -> Result<Vec<M>, StoreError>;

    /// Get a document by ID. Returns None if not found.
    fn get_model<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError>;

    /// Find documents matching a predicate, in the store's natural order.
    fn find_models<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError>;

    /// Atomically read, transform and replace a document.
    ///
    /// Returns `Ok(None)` if no document has this id. If `apply` fails, its
    /// error is returned and the stored document is left unchanged.
    fn find_and_update<M, E, F>(&self, id: &str, apply: F) -> Result<Option<M>, E>
    where
        M: Document,
        E: From<StoreError>,
        F: FnOnce(M) -> Result<M, E>;

    /// Delete a document by ID. Returns the removed document if it existed.
    fn delete_model<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError>;

    /// Delete every document in the collection. Returns how many were removed.
    fn delete_all<M: Document>(&self) -> Result<usize, StoreError>;

    /// Number of documents in the collection.
    fn count<M: Document>(&self) -> Result<usize, StoreError>;

    /// Find documents whose serialized form matches `filter`.
    fn find_by<M: Document>(&self, filter: &Filter) -> Result<Vec<M>, StoreError> {
        self.find_models::<M>(&|model| {
            serde_json::to_value(model)
                .map(|doc| filter.matches(&doc))
                .unwrap_or(false)
        })
    }

    /// Find documents matching `filter` and return only the projected fields.
    fn project<M: Document>(
        &self,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Value>, StoreError> {
        self.find_by::<M>(filter)?
            .iter()
            .map(|model| -> Result<Value, StoreError> {
                let doc = serde_json::to_value(model)?;
                Ok(projection.apply(&doc, M::ID_FIELD))
            })
            .collect()
    }
}
