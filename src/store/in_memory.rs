//! InMemoryDocumentStore - IndexMap-backed document database for tests and development.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use super::{DocumentStore, StoreError};
use crate::document::Document;

type Storage = IndexMap<String, Vec<u8>>;

struct Database {
    name: String,
    open: AtomicBool,
    storage: RwLock<Storage>,
}

/// In-memory document database.
///
/// Storage key is `"COLLECTION:id"`. Documents are kept in insertion order,
/// which is the natural order returned by finds. Clone-friendly via Arc: every
/// clone is a handle to the same database and sees the same open/closed state.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    db: Arc<Database>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty, open database named `default`.
    pub fn new() -> Self {
        Self::with_name("default")
    }

    /// Open a named logical database.
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\', '.', ' ', '$']) {
            return Err(StoreError::Storage(format!(
                "invalid database name {:?}",
                name
            )));
        }
        Ok(Self::with_name(name))
    }

    fn with_name(name: &str) -> Self {
        Self {
            db: Arc::new(Database {
                name: name.to_string(),
                open: AtomicBool::new(true),
                storage: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// Name of the logical database.
    pub fn database(&self) -> &str {
        &self.db.name
    }

    pub fn is_open(&self) -> bool {
        self.db.open.load(Ordering::Acquire)
    }

    /// Close the database. Every later call fails with `StoreError::Closed`.
    pub fn close(&self) {
        self.db.open.store(false, Ordering::Release);
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::Closed {
                database: self.db.name.clone(),
            })
        }
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Storage>, StoreError> {
        self.ensure_open()?;
        self.db
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Storage>, StoreError> {
        self.ensure_open()?;
        self.db
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn decode<M: Document>(bytes: &[u8]) -> Result<M, StoreError> {
        serde_json::from_slice(bytes).map_err(StoreError::from)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert_model<M: Document>(&self, model: &M) -> Result<M, StoreError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write("insert")?;
        if storage.contains_key(&key) {
            return Err(StoreError::Duplicate {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }
        storage.insert(key, bytes);

        Ok(model.clone())
    }

    fn insert_many<M: Document>(&self, models: &[M]) -> Result<Vec<M>, StoreError> {
        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            entries.push((
                Self::make_key(M::COLLECTION, model.id()),
                serde_json::to_vec(model)?,
            ));
        }

        let mut storage = self.write("insert_many")?;
        for (i, (key, _)) in entries.iter().enumerate() {
            let repeated = entries[..i].iter().any(|(earlier, _)| earlier == key);
            if repeated || storage.contains_key(key) {
                return Err(StoreError::Duplicate {
                    collection: M::COLLECTION.to_string(),
                    id: models[i].id().to_string(),
                });
            }
        }
        storage.extend(entries);

        Ok(models.to_vec())
    }

    fn get_model<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read("get")?;

        storage
            .get(&key)
            .map(|bytes| Self::decode(bytes))
            .transpose()
    }

    fn find_models<M: Document>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<M>, StoreError> {
        let storage = self.read("find")?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut results = Vec::new();

        for (key, bytes) in storage.iter() {
            if key.starts_with(&prefix) {
                let model: M = Self::decode(bytes)?;
                if predicate(&model) {
                    results.push(model);
                }
            }
        }

        Ok(results)
    }

    fn find_and_update<M, E, F>(&self, id: &str, apply: F) -> Result<Option<M>, E>
    where
        M: Document,
        E: From<StoreError>,
        F: FnOnce(M) -> Result<M, E>,
    {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write("update")?;

        let Some(bytes) = storage.get(&key) else {
            return Ok(None);
        };
        let current: M = Self::decode(bytes)?;

        let updated = apply(current)?;
        if updated.id() != id {
            return Err(StoreError::Storage(format!(
                "update of {}:{} attempted to change its id",
                M::COLLECTION,
                id
            ))
            .into());
        }

        let bytes = serde_json::to_vec(&updated).map_err(StoreError::from)?;
        storage.insert(key, bytes);

        Ok(Some(updated))
    }

    fn delete_model<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write("delete")?;

        storage
            .shift_remove(&key)
            .map(|bytes| Self::decode(&bytes))
            .transpose()
    }

    fn delete_all<M: Document>(&self) -> Result<usize, StoreError> {
        let prefix = format!("{}:", M::COLLECTION);
        let mut storage = self.write("delete_all")?;

        let before = storage.len();
        storage.retain(|key, _| !key.starts_with(&prefix));

        Ok(before - storage.len())
    }

    fn count<M: Document>(&self) -> Result<usize, StoreError> {
        let prefix = format!("{}:", M::COLLECTION);
        let storage = self.read("count")?;

        Ok(storage.keys().filter(|key| key.starts_with(&prefix)).count())
    }
}
