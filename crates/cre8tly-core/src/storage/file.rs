//! File-based storage implementation for native platforms.

use super::{DEFAULT_NAMESPACE, KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used inside the storage directory.
const STORE_FILE: &str = "preferences.json";

/// Scratch file renamed over the store on every write.
const TEMP_FILE: &str = "preferences.json.tmp";

/// File-backed store for native platforms.
///
/// All values live in a single JSON object that is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store in `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self {
            path: base_path.join(STORE_FILE),
            lock: Mutex::new(()),
        })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/cre8tly/`
    /// On Windows: `%LOCALAPPDATA%\cre8tly\`
    pub fn default_location() -> StorageResult<Self> {
        Self::in_data_dir(DEFAULT_NAMESPACE)
    }

    /// Store under `<platform data dir>/<namespace>`.
    pub fn in_data_dir(namespace: &str) -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join(namespace))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Current values for a read-modify-write, and whether the file was
    /// unreadable. A corrupt file is replaced rather than blocking every
    /// later write.
    fn read_for_update(&self) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.read_all() {
            Ok(values) => Ok((values, false)),
            Err(StorageError::Serialization(e)) => {
                log::warn!(
                    "Discarding unreadable preferences in {}: {}",
                    self.path.display(),
                    e
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    /// Write to a temp file and rename it over the store, so a crash
    /// mid-write leaves the previous file intact.
    fn write_all(&self, values: &BTreeMap<String, String>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let temp = self.path.with_file_name(TEMP_FILE);
        fs::write(&temp, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", temp.display(), e))
        })?;
        fs::rename(&temp, &self.path).map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }

    fn locked(&self) -> StorageResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.locked()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.locked()?;
        let (mut values, _) = self.read_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.locked()?;
        let (mut values, corrupt) = self.read_for_update()?;
        if values.remove(key).is_some() || corrupt {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_persists_across_instances() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.set("theme", "light").unwrap();

        let reopened = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        store.set("accessToken", "t0k3n").unwrap();
        store.remove("accessToken").unwrap();
        assert_eq!(store.get("accessToken").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.get("theme"), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_write_recovers_from_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        fs::write(store.path(), r#"{"theme": "li"#).unwrap();

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert!(!dir.path().join(TEMP_FILE).exists());
    }

    #[test]
    fn test_remove_recovers_from_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        fs::write(store.path(), "{").unwrap();

        store.remove("accessToken").unwrap();
        assert_eq!(store.get("accessToken").unwrap(), None);
    }
}
