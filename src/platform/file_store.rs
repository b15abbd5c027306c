//! JSON-file backed preference store.
//!
//! The file holds one flat JSON object of string keys and string values.
//! Every read goes to disk and every write is read-modify-write, so several
//! handles on the same file see each other's changes (last write wins).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::traits::PreferenceStore;

const APP_DIR: &str = "mockbox";
const FILE_NAME: &str = "preferences.json";

/// Preference store persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/mockbox/preferences.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Store at [`default_path`](Self::default_path).
    pub fn open_default() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_error)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A malformed file is replaced rather than blocking every later write.
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StoreError::Malformed { .. }) => {
                log::warn!("Replacing malformed preference file {}", self.path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };

        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> FileStore {
        let path = env::temp_dir()
            .join(format!("mockbox_shell_{}_{}", name, std::process::id()))
            .join(FILE_NAME);
        let _ = fs::remove_file(&path);
        FileStore::new(path)
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let store = temp_store("missing");
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_handles_share_the_same_file() {
        let mut first = temp_store("shared");
        let mut second = FileStore::new(first.path().to_path_buf());

        first.set("theme", "dark").unwrap();
        second.set("sidebar_collapsed", "true").unwrap();

        assert_eq!(second.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(first.get("sidebar_collapsed").unwrap().as_deref(), Some("true"));

        let _ = fs::remove_file(first.path());
    }

    #[test]
    fn test_malformed_file_fails_reads_and_is_replaced_on_write() {
        let mut store = temp_store("malformed");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.get("theme"), Err(StoreError::Malformed { .. })));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));

        let _ = fs::remove_file(store.path());
    }
}
