//! Local key-value storage for session and cart snapshots.

use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Storage key holding the serialized cart lines.
pub const CART_KEY: &str = "cartData";

/// Storage key holding the coupon applied to the cart.
pub const COUPON_KEY: &str = "cartCoupon";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage io error for key {key}")]
    Io {
        /// Key being accessed.
        key: String,

        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Keys are used as file names and must be plain identifiers.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// A writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Plain, unencrypted string storage shared by the session and cart containers.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        values.remove(key);

        Ok(())
    }
}

/// Directory-backed store with one file per key.
///
/// Each file is named after its key and holds the raw stored string.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;

        Ok(Self { root })
    }

    /// Directory holding the stored values.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("tmp");

        fs::write(&staging, value)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() -> TestResult {
        let store = MemoryStore::new();

        store.set(TOKEN_KEY, "abc")?;
        assert_eq!(store.get(TOKEN_KEY)?.as_deref(), Some("abc"));

        store.remove(TOKEN_KEY)?;
        assert_eq!(store.get(TOKEN_KEY)?, None);

        Ok(())
    }

    #[test]
    fn file_store_persists_across_instances() -> TestResult {
        let dir = tempfile::tempdir()?;

        FileStore::open(dir.path())?.set(CART_KEY, "[]")?;

        let reopened = FileStore::open(dir.path())?;

        assert_eq!(reopened.get(CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn file_store_writes_raw_values_named_by_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        store.set(TOKEN_KEY, "tok-123")?;

        assert_eq!(fs::read_to_string(dir.path().join(TOKEN_KEY))?, "tok-123");
        assert!(!dir.path().join(format!("{TOKEN_KEY}.json")).exists());
        assert!(!dir.path().join(format!("{TOKEN_KEY}.tmp")).exists());

        Ok(())
    }

    #[test]
    fn file_store_missing_key_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        assert_eq!(store.get(TOKEN_KEY)?, None);
        store.remove(TOKEN_KEY)?;

        Ok(())
    }

    #[test]
    fn file_store_rejects_path_like_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::open(dir.path())?;

        let result = store.set("../escape", "x");

        assert!(
            matches!(result, Err(StorageError::InvalidKey(_))),
            "expected InvalidKey, got {result:?}"
        );

        Ok(())
    }
}
