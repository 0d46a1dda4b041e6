//! Database facade: collection tree ownership and bootstrap.

use crate::collection::CollectionHandle;
use crate::config::Config;
use crate::error::CoreResult;
use crate::persist;
use crate::schema::ValidatorSpec;
use crate::types::Tree;
use jotdb_storage::{FileBackend, StorageBackend};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;

/// Shared state behind every handle derived from one database.
///
/// The whole collection tree is a single mutable resource; every
/// collection handle reaches it through this struct. There is no
/// per-collection or per-document lock.
pub(crate) struct DatabaseInner {
    /// The in-memory collection tree.
    pub(crate) tree: RwLock<Tree>,
    /// Backing blob store. `None` means memory-only: flush is a no-op.
    pub(crate) backend: Option<Mutex<Box<dyn StorageBackend>>>,
    /// Serialization hooks, fixed at open time.
    pub(crate) config: Config,
}

/// The main database handle.
///
/// `Database` owns the map of collection name to documents, the
/// optional backing file, and the (de)serialization hooks. It loads
/// the backing file once at construction and hands out
/// [`CollectionHandle`]s bound to a validator.
///
/// # Opening a Database
///
/// ```rust,ignore
/// use jotdb_core::{Database, FieldType, Schema};
/// use std::path::Path;
///
/// let db = Database::open(Path::new("store.json"))?;
/// let users = db.collect("users", Schema::new().field("name", FieldType::String).into());
/// ```
///
/// # In-Memory Databases
///
/// `Database::open_in_memory()` runs without any backing file; no
/// flush ever touches disk.
///
/// # Durability
///
/// Every mutation rewrites the whole backing file in place. There is
/// no write-ahead log, no atomic replacement, and no rollback: if a
/// flush fails, the in-memory change has already been applied and the
/// caller must treat the file as stale.
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Opens a database backed by the file at `path`.
    ///
    /// The file is created (with an empty tree) if it does not exist;
    /// otherwise its contents are decoded into the in-memory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, or if
    /// its contents cannot be decoded.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a file-backed database with custom serialization hooks.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, or if
    /// its contents cannot be decoded.
    pub fn open_with_config(path: &Path, config: Config) -> CoreResult<Self> {
        let backend = FileBackend::open_with_create_dirs(path)?;
        Self::open_with_backend(Box::new(backend), config)
    }

    /// Opens a database over a pre-built storage backend.
    ///
    /// This is the lower-level constructor: tests use it with an
    /// in-memory backend to observe exactly what flushes write.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or its blob
    /// cannot be decoded.
    pub fn open_with_backend(
        mut backend: Box<dyn StorageBackend>,
        config: Config,
    ) -> CoreResult<Self> {
        let text = backend.read_all()?;

        let tree = if text.trim().is_empty() {
            // Fresh store: seed the blob with an empty tree.
            let tree = Tree::new();
            backend.write_all(&config.encode(&tree)?)?;
            tree
        } else {
            config.decode(&text)?
        };

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                tree: RwLock::new(tree),
                backend: Some(Mutex::new(backend)),
                config,
            }),
        })
    }

    /// Opens a memory-only database: no backing file, flush is a
    /// no-op.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::open_in_memory_with_config(Config::default())
    }

    /// Opens a memory-only database with custom hooks.
    ///
    /// The hooks are kept but never invoked, since no flush ever
    /// encodes anything; this exists so callers can build
    /// configuration uniformly.
    #[must_use]
    pub fn open_in_memory_with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(DatabaseInner {
                tree: RwLock::new(Tree::new()),
                backend: None,
                config,
            }),
        }
    }

    /// Binds a validator to the named collection and returns a handle.
    ///
    /// The collection is created lazily on first bind; re-binding an
    /// existing name never discards its documents. Re-binding with a
    /// different validator does not re-validate documents already
    /// stored.
    pub fn collect(&self, name: &str, spec: ValidatorSpec) -> CollectionHandle {
        let validator = spec.resolve();

        self.inner.tree.write().entry(name.to_string()).or_default();

        CollectionHandle::new(Arc::clone(&self.inner), name.to_string(), validator)
    }

    /// Deletes the named collection and all its documents, then
    /// flushes.
    ///
    /// Returns whether the collection existed.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory removal.
    pub fn remove(&self, name: &str) -> CoreResult<bool> {
        let existed = self.inner.tree.write().shift_remove(name).is_some();
        persist::flush(&self.inner)?;
        Ok(existed)
    }

    /// Empties the entire tree (all collections), then flushes.
    ///
    /// # Errors
    ///
    /// Flush failure surfaces here after the in-memory clear.
    pub fn clear(&self) -> CoreResult<()> {
        self.inner.tree.write().clear();
        persist::flush(&self.inner)
    }

    /// Returns the names of all collections, in creation order.
    #[must_use]
    pub fn collection_names(&self) -> Vec<String> {
        self.inner.tree.read().keys().cloned().collect()
    }

    /// Checks whether this database runs without a backing store.
    #[must_use]
    pub fn is_memory_only(&self) -> bool {
        self.inner.backend.is_none()
    }

    /// Reads the current backing blob, for flush assertions in tests.
    #[cfg(test)]
    pub(crate) fn backend_data(&self) -> Option<String> {
        self.inner
            .backend
            .as_ref()
            .map(|backend| backend.lock().read_all().unwrap_or_default())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("collections", &self.collection_names())
            .field("memory_only", &self.is_memory_only())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, Schema};
    use jotdb_storage::InMemoryBackend;
    use serde_json::json;

    fn users_spec() -> ValidatorSpec {
        Schema::new().field("name", FieldType::String).into()
    }

    #[test]
    fn open_in_memory_is_empty() {
        let db = Database::open_in_memory();
        assert!(db.is_memory_only());
        assert!(db.collection_names().is_empty());
    }

    #[test]
    fn collect_creates_collection_lazily() {
        let db = Database::open_in_memory();
        assert!(db.collection_names().is_empty());

        db.collect("users", users_spec());
        assert_eq!(db.collection_names(), vec!["users".to_string()]);
    }

    #[test]
    fn rebind_keeps_existing_documents() {
        let db = Database::open_in_memory();
        let users = db.collect("users", users_spec());

        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();

        // Rebinding, even with a different validator, discards nothing.
        let rebound = db.collect("users", ValidatorSpec::from(Schema::new()));
        assert_eq!(rebound.count(), 1);
        assert_eq!(rebound.select(doc.id.as_str()).unwrap().data, doc.data);
    }

    #[test]
    fn remove_drops_collection() {
        let db = Database::open_in_memory();
        let users = db.collect("users", users_spec());
        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();

        assert!(db.remove("users").unwrap());
        assert!(db.collection_names().is_empty());
        assert!(!db.remove("users").unwrap());
    }

    #[test]
    fn clear_drops_everything() {
        let db = Database::open_in_memory();
        db.collect("users", users_spec());
        db.collect("posts", ValidatorSpec::from(Schema::new()));

        db.clear().unwrap();
        assert!(db.collection_names().is_empty());
    }

    #[test]
    fn empty_blob_is_seeded_with_empty_tree() {
        let db =
            Database::open_with_backend(Box::new(InMemoryBackend::new()), Config::default())
                .unwrap();
        assert_eq!(db.backend_data().unwrap(), "{}");
    }

    #[test]
    fn malformed_blob_fails_to_open() {
        let backend = InMemoryBackend::with_data("not json at all");
        let result = Database::open_with_backend(Box::new(backend), Config::default());
        assert!(matches!(result, Err(crate::CoreError::Codec(_))));
    }

    #[test]
    fn mutation_flushes_whole_tree() {
        let db =
            Database::open_with_backend(Box::new(InMemoryBackend::new()), Config::default())
                .unwrap();
        let users = db.collect("users", users_spec());
        let posts = db.collect("posts", ValidatorSpec::from(Schema::new()));

        let post = posts.create(json!({"title": "hello"})).unwrap();
        posts.save(&post).unwrap();
        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();

        // The flush triggered by the users mutation carries posts too.
        let blob = db.backend_data().unwrap();
        let tree: Tree = serde_json::from_str(&blob).unwrap();
        assert!(tree.contains_key("users"));
        assert!(tree.contains_key("posts"));
        assert_eq!(tree["posts"].len(), 1);
    }

    #[test]
    fn blob_reload_round_trips() {
        let first =
            Database::open_with_backend(Box::new(InMemoryBackend::new()), Config::default())
                .unwrap();
        let users = first.collect("users", users_spec());
        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();
        let blob = first.backend_data().unwrap();

        let second = Database::open_with_backend(
            Box::new(InMemoryBackend::with_data(blob)),
            Config::default(),
        )
        .unwrap();
        let reloaded = second.collect("users", users_spec());
        assert_eq!(reloaded.count(), 1);
        let selected = reloaded.select(doc.id.as_str()).unwrap();
        assert_eq!(selected.id, doc.id);
        assert_eq!(selected.data, json!({"name": "ada"}));
    }

    #[test]
    fn custom_hooks_round_trip() {
        let framed = || {
            Config::new()
                .encode_with(|tree| Ok(format!("jot:{}", serde_json::to_string(tree)?)))
                .decode_with(|text| {
                    let inner = text.strip_prefix("jot:").unwrap_or(text);
                    Ok(serde_json::from_str(inner)?)
                })
        };

        let db = Database::open_with_backend(Box::new(InMemoryBackend::new()), framed()).unwrap();
        let users = db.collect("users", users_spec());
        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();

        let blob = db.backend_data().unwrap();
        assert!(blob.starts_with("jot:"));

        let again =
            Database::open_with_backend(Box::new(InMemoryBackend::with_data(blob)), framed())
                .unwrap();
        assert_eq!(again.collect("users", users_spec()).count(), 1);
    }

    #[test]
    fn memory_only_mutations_never_fail_on_flush() {
        let db = Database::open_in_memory();
        let users = db.collect("users", users_spec());

        let doc = users.create(json!({"name": "ada"})).unwrap();
        users.save(&doc).unwrap();
        users.clear().unwrap();
        db.clear().unwrap();
    }
}
