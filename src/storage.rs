//! Persistent client storage for the bearer token

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid storage value: {0}")]
    InvalidValue(String),
}

/// Key/value string storage that survives between runs
pub trait TokenStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str);

    fn token(&self) -> Option<String> {
        self.get_item(AUTH_TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StorageError::InvalidValue("token must not be empty".to_string()));
        }
        self.set_item(AUTH_TOKEN_KEY, token)
    }

    fn clear_token(&self) {
        self.remove_item(AUTH_TOKEN_KEY)
    }
}

/// One file per key inside a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                let value = value.trim().to_string();
                if value.is_empty() {
                    None
                } else {
                    Some(value)
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        write_private(&path, value).map_err(|source| StorageError::Write { path, source })
    }

    fn remove_item(&self, key: &str) {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}

/// Write `value` readable by the owner only (0600 on unix)
fn write_private(path: &Path, value: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let mut file = options.open(path)?;
        // mode only applies on create; tighten files left by older versions
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(value.as_bytes())
    }
    #[cfg(not(unix))]
    {
        options.open(path)?.write_all(value.as_bytes())
    }
}

/// Non-persistent storage, for tests and one-shot sessions
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        }
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::InvalidValue("storage lock poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("expense-tracker-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.token(), None);
        storage.set_token("abc.def").unwrap();
        assert_eq!(storage.token(), Some("abc.def".to_string()));
        assert!(dir.join(AUTH_TOKEN_KEY).exists());

        storage.clear_token();
        assert_eq!(storage.token(), None);
        // Removing a missing key is not an error
        storage.clear_token();

        let _ = fs::remove_dir_all(dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(AUTH_TOKEN_KEY);
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileStorage::new(&dir);
        storage.set_token("fresh").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(storage.token(), Some("fresh".to_string()));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_empty_token_rejected() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.set_token("   "), Err(StorageError::InvalidValue(_))));
        assert_eq!(storage.token(), None);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::with_token("t0k3n");
        assert_eq!(storage.token(), Some("t0k3n".to_string()));
        storage.clear_token();
        assert_eq!(storage.token(), None);
    }
}
