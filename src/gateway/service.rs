//! Gateway - CRUD operations over one document type.

use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::GatewayError;
use crate::document::Document;
use crate::schema::{FieldError, FieldErrorKind, ValidationErrors};
use crate::store::DocumentStore;

/// CRUD gateway for documents of type `D`, backed by the injected store `S`.
///
/// Every operation validates before it writes and makes exactly one call
/// against the store. Unknown fields in request bodies are rejected, and the
/// id field can never be supplied by callers.
pub struct Gateway<S, D> {
    store: S,
    _marker: PhantomData<fn() -> D>,
}

impl<S: Clone, D> Clone for Gateway<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S: DocumentStore, D: Document> Gateway<S, D> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `body` and persist it as a new document with a fresh id.
    pub fn create(&self, body: Value) -> Result<D, GatewayError> {
        let fields = Self::body_fields(body)?;
        Self::validate(&fields)?;

        let document = Self::assemble(Uuid::new_v4().to_string(), fields)?;
        let created = self.store.insert_model(&document)?;
        info!(collection = D::COLLECTION, id = created.id(), "document created");
        Ok(created)
    }

    /// Every document of this type, in store-native order.
    pub fn list_all(&self) -> Result<Vec<D>, GatewayError> {
        let documents = self.store.find_models::<D>(&|_| true)?;
        debug!(collection = D::COLLECTION, count = documents.len(), "documents listed");
        Ok(documents)
    }

    pub fn get_by_id(&self, id: &str) -> Result<D, GatewayError> {
        self.store
            .get_model::<D>(id)?
            .ok_or_else(|| GatewayError::not_found(D::NAME, id))
    }

    /// Merge `body` into the stored document, re-validate, and replace it.
    ///
    /// Merge and validation run inside the store's atomic update, so a
    /// rejected update leaves the stored document untouched.
    pub fn update_by_id(&self, id: &str, body: Value) -> Result<D, GatewayError> {
        let changes = Self::body_fields(body)?;

        let updated = self.store.find_and_update(id, |current: D| {
            let mut merged = Self::stored_fields(&current)?;
            merged.extend(changes);
            Self::validate(&merged)?;
            Self::assemble(id.to_string(), merged)
        })?;

        match updated {
            Some(document) => {
                info!(collection = D::COLLECTION, id, "document updated");
                Ok(document)
            }
            None => Err(GatewayError::not_found(D::NAME, id)),
        }
    }

    /// Remove a document, returning it.
    pub fn delete_by_id(&self, id: &str) -> Result<D, GatewayError> {
        let removed = self
            .store
            .delete_model::<D>(id)?
            .ok_or_else(|| GatewayError::not_found(D::NAME, id))?;
        info!(collection = D::COLLECTION, id, "document deleted");
        Ok(removed)
    }

    fn validate(fields: &Map<String, Value>) -> Result<(), GatewayError> {
        D::schema()
            .validate(fields)
            .map_err(|e| GatewayError::Validation(e.for_document(D::NAME)))
    }

    fn invalid(error: FieldError) -> GatewayError {
        GatewayError::Validation(ValidationErrors::new(vec![error]).for_document(D::NAME))
    }

    /// Request bodies must be JSON objects and must not carry the id field.
    fn body_fields(body: Value) -> Result<Map<String, Value>, GatewayError> {
        let Value::Object(fields) = body else {
            return Err(Self::invalid(FieldError::new(
                "body",
                FieldErrorKind::WrongType { expected: "object" },
            )));
        };
        if fields.contains_key(D::ID_FIELD) {
            return Err(Self::invalid(FieldError::new(
                D::ID_FIELD,
                FieldErrorKind::Immutable,
            )));
        }
        Ok(fields)
    }

    /// The stored document's fields, without its id.
    fn stored_fields(document: &D) -> Result<Map<String, Value>, GatewayError> {
        match serde_json::to_value(document).map_err(crate::store::StoreError::from)? {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .filter(|(key, _)| key != D::ID_FIELD)
                .collect()),
            _ => Err(Self::invalid(FieldError::new(
                "body",
                FieldErrorKind::WrongType { expected: "object" },
            ))),
        }
    }

    fn assemble(id: String, mut fields: Map<String, Value>) -> Result<D, GatewayError> {
        D::schema().fill_null_lists(&mut fields);

        let mut document = Map::with_capacity(fields.len() + 1);
        document.insert(D::ID_FIELD.to_string(), Value::String(id));
        document.extend(fields);

        serde_json::from_value(Value::Object(document)).map_err(|e| {
            Self::invalid(FieldError::new(
                "body",
                FieldErrorKind::Malformed {
                    reason: e.to_string(),
                },
            ))
        })
    }
}
