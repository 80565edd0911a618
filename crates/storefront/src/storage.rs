//! Durable per-user key/value storage.
//!
//! The web frontend this client mirrors kept its state in the browser's
//! local storage under the keys `token`, `cartItems`, and `userStatus`. Here
//! the same keys map to one JSON file each under the data directory. Files
//! are written with restricted permissions (0600) since one of them holds a
//! credential.
//!
//! There is no cross-process synchronization: two programs sharing a data
//! directory reconcile only through whichever file write lands last, exactly
//! like two browser tabs sharing local storage.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized cart lines.
pub const CART_KEY: &str = "cartItems";
/// Storage key for the seller approval status.
pub const SELLER_STATUS_KEY: &str = "userStatus";

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt value in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// A file-per-key JSON store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The file path backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read and deserialize the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as the
    /// expected type. Callers decide whether that is fatal; the cart, for
    /// example, treats it as an empty cart.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { path, source })
    }

    /// Serialize `value` and overwrite the file for `key`.
    ///
    /// This is a full serialize-and-overwrite on every call; values are
    /// small enough that incremental writes would buy nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        }

        write_restricted(&path, &contents).map_err(|source| StorageError::Write { path, source })
    }

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

/// Write `contents` to `path` with mode 0600 on unix.
fn write_restricted(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(contents.as_bytes())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, storage) = temp_storage();
        let value: Option<String> = storage.get("token").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let (_dir, storage) = temp_storage();
        storage.set("token", "abc.def.ghi").unwrap();
        let value: Option<String> = storage.get("token").unwrap();
        assert_eq!(value.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, storage) = temp_storage();
        storage.set("userStatus", "PENDING_APPROVAL").unwrap();
        storage.set("userStatus", "ACTIVE").unwrap();
        let value: Option<String> = storage.get("userStatus").unwrap();
        assert_eq!(value.as_deref(), Some("ACTIVE"));
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let (_dir, storage) = temp_storage();
        fs::write(storage.path_for("cartItems"), "not json {").unwrap();
        let result: Result<Option<Vec<String>>, _> = storage.get("cartItems");
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = temp_storage();
        storage.set("token", "t").unwrap();
        storage.remove("token").unwrap();
        storage.remove("token").unwrap();
        let value: Option<String> = storage.get("token").unwrap();
        assert!(value.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, storage) = temp_storage();
        storage.set("token", "secret").unwrap();
        let mode = fs::metadata(storage.path_for("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
