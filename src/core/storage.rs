//! Key-value storage backends for the catalog
//!
//! The catalog persists under two independent keys (`courses`, `templates`).
//! The backend is injected into [`CatalogStore`](super::catalog::CatalogStore)
//! at construction, so there is no module-level storage singleton.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Durable key-value storage seam
///
/// Implementations hold one UTF-8 value per key. Errors are reported as
/// strings; the store layered above converts them into fail-soft defaults.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if the key was never written
    ///
    /// # Errors
    /// Returns an error if the underlying medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, String>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the underlying medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove `key` and its value (succeeds if the key is absent)
    ///
    /// # Errors
    /// Returns an error if the underlying medium cannot be modified.
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// File-backed storage: one JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create {}: {e}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| format!("Failed to remove {}: {e}", path.display()))?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and embedding
///
/// Interior mutability via `RefCell` is fine here: the whole system is
/// single-threaded and every operation runs to completion.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.read("courses"), Ok(None));
        storage.write("courses", "[]").expect("write should succeed");
        assert_eq!(storage.read("courses"), Ok(Some("[]".to_string())));

        storage.remove("courses").expect("remove should succeed");
        assert_eq!(storage.read("courses"), Ok(None));
    }

    #[test]
    fn test_memory_storage_remove_absent_key_succeeds() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("nothing").is_ok());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp.path().join("data"));

        assert_eq!(storage.read("courses"), Ok(None));
        storage
            .write("courses", r#"[{"code":"CM1111"}]"#)
            .expect("write should succeed");
        assert_eq!(
            storage.read("courses"),
            Ok(Some(r#"[{"code":"CM1111"}]"#.to_string()))
        );

        storage.remove("courses").expect("remove should succeed");
        assert_eq!(storage.read("courses"), Ok(None));
    }

    #[test]
    fn test_file_storage_keys_are_independent_files() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let storage = FileStorage::new(temp.path().to_path_buf());

        storage.write("courses", "[1]").expect("write courses");
        storage.write("templates", "[2]").expect("write templates");

        assert!(temp.path().join("courses.json").exists());
        assert!(temp.path().join("templates.json").exists());

        storage.remove("courses").expect("remove courses");
        assert_eq!(storage.read("templates"), Ok(Some("[2]".to_string())));
    }
}
