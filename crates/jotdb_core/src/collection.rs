//! Collection engine: document CRUD and queries over one named
//! collection.

use crate::database::DatabaseInner;
use crate::document::{Document, DocumentId};
use crate::error::{CoreError, CoreResult};
use crate::matcher::matches;
use crate::persist;
use crate::schema::Validator;
use crate::types::DocumentMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// A handle to one named collection of a [`crate::Database`].
///
/// The handle holds a shared reference to the owning database and the
/// validator bound at `collect` time; it owns no documents itself. Any
/// number of handles to the same collection may coexist, and all of
/// them mutate the same underlying tree.
///
/// Every mutating operation applies its in-memory change and then
/// flushes the whole store exactly once before returning. Queries hand
/// out clones; the collection map remains the single owner of its
/// documents.
#[derive(Clone)]
pub struct CollectionHandle {
    db: Arc<DatabaseInner>,
    name: String,
    validator: Arc<dyn Validator>,
}

impl CollectionHandle {
    pub(crate) fn new(db: Arc<DatabaseInner>, name: String, validator: Arc<dyn Validator>) -> Self {
        Self { db, name, validator }
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of documents in the collection.
    #[must_use]
    pub fn count(&self) -> usize {
        self.db
            .tree
            .read()
            .get(&self.name)
            .map_or(0, DocumentMap::len)
    }

    /// Checks whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Validates `raw` and builds a document with a freshly generated
    /// id.
    ///
    /// Nothing is inserted or persisted yet; persistence happens on
    /// [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] if `raw` does not satisfy the bound
    /// validator; nothing is created in that case.
    pub fn create(&self, raw: Value) -> CoreResult<Document> {
        let data = self.validator.validate(&raw)?;

        let tree = self.db.tree.read();
        let empty = DocumentMap::new();
        let documents = tree.get(&self.name).unwrap_or(&empty);
        let id = DocumentId::generate(&self.name, documents)?;

        Ok(Document::new(id, data))
    }

    /// Inserts or overwrites the document at its id, then flushes.
    ///
    /// Returns the stored value. The payload is not re-checked here:
    /// documents only carry data that already passed the collection's
    /// validator, via [`create`](Self::create) or
    /// [`set_value`](Self::set_value).
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory insert has
    /// already happened.
    pub fn save(&self, document: &Document) -> CoreResult<Value> {
        {
            let mut tree = self.db.tree.write();
            let documents = tree.entry(self.name.clone()).or_default();
            documents.insert(document.id.as_str().to_string(), document.clone());
        }

        debug!(collection = %self.name, id = %document.id, "saved document");
        persist::flush(&self.db)?;
        Ok(document.data.clone())
    }

    /// Removes the document by its own id.
    ///
    /// Returns whether removal occurred; flushes only if it did.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory removal.
    pub fn del(&self, document: &Document) -> CoreResult<bool> {
        self.remove(document.id.as_str())
    }

    /// Re-validates `raw`, replaces the document's value, and saves.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] before any mutation if `raw` is
    /// rejected.
    pub fn set_value(&self, document: &mut Document, raw: Value) -> CoreResult<Value> {
        document.data = self.validator.validate(&raw)?;
        self.save(document)
    }

    /// Removes a document by id, not tied to a held handle.
    ///
    /// Returns whether removal occurred; flushes only if it did.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory removal.
    pub fn remove(&self, id: &str) -> CoreResult<bool> {
        let removed = {
            let mut tree = self.db.tree.write();
            tree.get_mut(&self.name)
                .and_then(|documents| documents.shift_remove(id))
                .is_some()
        };

        if removed {
            debug!(collection = %self.name, id, "removed document");
            persist::flush(&self.db)?;
        }
        Ok(removed)
    }

    /// Deletes every document whose `data` matches `pattern`, scanning
    /// in insertion order.
    ///
    /// Stops early once `limit` deletions have been attempted, if a
    /// limit is given. Flushes once at the end regardless of how many
    /// were removed. Returns `false` if any attempted deletion failed
    /// to actually remove an entry (partial failure; what was removed
    /// stays removed), else `true`.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory removals.
    pub fn remove_all(&self, pattern: &Value, limit: Option<usize>) -> CoreResult<bool> {
        let mut all_removed = true;

        {
            let mut tree = self.db.tree.write();
            if let Some(documents) = tree.get_mut(&self.name) {
                let matched: Vec<String> = documents
                    .iter()
                    .filter(|(_, doc)| matches(pattern, &doc.data))
                    .map(|(id, _)| id.clone())
                    .collect();

                let mut attempted = 0usize;
                for id in matched {
                    if limit.is_some_and(|n| attempted >= n) {
                        break;
                    }
                    attempted += 1;

                    if documents.shift_remove(&id).is_none() {
                        all_removed = false;
                        break;
                    }
                }
            }
        }

        debug!(collection = %self.name, "removed matching documents");
        persist::flush(&self.db)?;
        Ok(all_removed)
    }

    /// Returns the document at `id`, or `None` if it is absent.
    #[must_use]
    pub fn select(&self, id: &str) -> Option<Document> {
        self.db.tree.read().get(&self.name)?.get(id).cloned()
    }

    /// Collects documents whose `data` matches `pattern`, scanning in
    /// insertion order, stopping once `limit` matches are collected if
    /// a limit is given.
    #[must_use]
    pub fn find(&self, pattern: &Value, limit: Option<usize>) -> Vec<Document> {
        let tree = self.db.tree.read();
        let Some(documents) = tree.get(&self.name) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for doc in documents.values() {
            if limit.is_some_and(|n| found.len() >= n) {
                break;
            }
            if matches(pattern, &doc.data) {
                found.push(doc.clone());
            }
        }
        found
    }

    /// Returns the first document matching `pattern`, if any.
    #[must_use]
    pub fn find_one(&self, pattern: &Value) -> Option<Document> {
        self.find(pattern, Some(1)).into_iter().next()
    }

    /// Updates the first document matching `pattern` with `new_value`.
    ///
    /// With `rewrite` false and existing object data, `new_value`'s
    /// fields are shallow-merged over the existing fields; otherwise
    /// the data is replaced outright. The result is re-validated before
    /// committing, then flushed. Returns the committed value.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if nothing matches (before any
    ///   mutation or flush)
    /// - [`CoreError::Validation`] if the merged result is rejected
    ///   (before any mutation or flush)
    pub fn update(&self, pattern: &Value, new_value: Value, rewrite: bool) -> CoreResult<Value> {
        let document = self
            .find_one(pattern)
            .ok_or_else(|| CoreError::not_found(&self.name, "no document matches pattern"))?;
        self.apply_update(&document, new_value, rewrite)
    }

    /// Like [`update`](Self::update), addressed by id directly.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the id is absent (no flush on that
    ///   path)
    /// - [`CoreError::Validation`] if the merged result is rejected
    pub fn update_id(&self, id: &str, new_value: Value, rewrite: bool) -> CoreResult<Value> {
        let document = self
            .select(id)
            .ok_or_else(|| CoreError::not_found(&self.name, id))?;
        self.apply_update(&document, new_value, rewrite)
    }

    fn apply_update(
        &self,
        document: &Document,
        new_value: Value,
        rewrite: bool,
    ) -> CoreResult<Value> {
        let merged = merge_value(&document.data, new_value, rewrite);
        let data = self.validator.validate(&merged)?;

        {
            let mut tree = self.db.tree.write();
            if let Some(stored) = tree
                .get_mut(&self.name)
                .and_then(|documents| documents.get_mut(document.id.as_str()))
            {
                stored.data = data.clone();
            }
        }

        debug!(collection = %self.name, id = %document.id, "updated document");
        persist::flush(&self.db)?;
        Ok(data)
    }

    /// Empties the collection's document map entirely, then flushes.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory clear.
    pub fn clear(&self) -> CoreResult<()> {
        {
            let mut tree = self.db.tree.write();
            if let Some(documents) = tree.get_mut(&self.name) {
                documents.clear();
            }
        }

        debug!(collection = %self.name, "cleared collection");
        persist::flush(&self.db)
    }
}

/// Shallow-merges `patch` into `existing` unless rewriting.
///
/// Non-object existing data, arrays included, is replaced outright
/// even when a merge was requested. A non-object patch over object
/// data has no fields to copy, so the existing object survives
/// unchanged.
fn merge_value(existing: &Value, patch: Value, rewrite: bool) -> Value {
    if rewrite {
        return patch;
    }

    match (existing, patch) {
        (Value::Object(base), Value::Object(fields)) => {
            let mut merged = base.clone();
            for (key, value) in fields {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        // A non-object patch over object data has no fields to copy.
        (Value::Object(base), _) => Value::Object(base.clone()),
        // Arrays and scalars: replace outright.
        (_, patch) => patch,
    }
}

impl std::fmt::Debug for CollectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionHandle")
            .field("name", &self.name)
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}
