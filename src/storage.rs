//! Durable key-value storage for the cached credential (the browser's
//! local storage, in a non-browser host).

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-lifetime store. Default when no storage path is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// All entries in one JSON object on disk. Writes go to a sibling temp file
/// first and are renamed into place, so a crash never leaves half a file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("telehealth-stores-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn memory_store_round_trip() {
        let s = MemoryStore::new();
        assert_eq!(s.get("authToken").unwrap(), None);
        s.set("authToken", "abc").unwrap();
        assert_eq!(s.get("authToken").unwrap().as_deref(), Some("abc"));
        s.remove("authToken").unwrap();
        assert_eq!(s.get("authToken").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path();
        FileStore::new(&path).set("manosara_auth", r#"{"token":"t"}"#).unwrap();
        FileStore::new(&path).set("authToken", "abc").unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("manosara_auth").unwrap().as_deref(), Some(r#"{"token":"t"}"#));
        reopened.remove("manosara_auth").unwrap();
        assert_eq!(FileStore::new(&path).get("manosara_auth").unwrap(), None);
        assert_eq!(FileStore::new(&path).get("authToken").unwrap().as_deref(), Some("abc"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let s = FileStore::new(temp_path());
        assert_eq!(s.get("anything").unwrap(), None);
        s.remove("anything").unwrap();
        assert!(!s.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let path = temp_path();
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::new(&path).get("k"), Err(StorageError::Format(_))));
        let _ = std::fs::remove_file(&path);
    }
}
