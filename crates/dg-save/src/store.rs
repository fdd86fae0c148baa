//! Key/value backends for save records

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::SaveError;

/// Durable string store keyed by save slot name
pub trait SaveStore {
    /// `Ok(None)` when nothing is stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError>;

    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;

    fn contains(&self, key: &str) -> bool;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_local_dir>/digger/saves`, or `./digger/saves` when the platform
    /// has no data directory
    pub fn default_location() -> Self {
        let mut dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push("digger");
        dir.push("saves");
        Self::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), data)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("digger_store_{}_{}", name, std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        FileStore::new(dir)
    }

    #[test]
    fn test_file_store_roundtrip() {
        let mut store = temp_store("roundtrip");
        assert!(!store.contains("slot"));
        assert_eq!(store.read("slot").unwrap(), None);

        store.write("slot", "{\"a\":1}").unwrap();
        assert!(store.contains("slot"));
        assert!(store.path_for("slot").ends_with("slot.json"));
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("{\"a\":1}"));

        store.remove("slot").unwrap();
        assert!(!store.contains("slot"));
        // idempotent
        store.remove("slot").unwrap();

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.write("a", "1").unwrap();
        store.write("a", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("a").unwrap().as_deref(), Some("2"));
        store.remove("a").unwrap();
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_default_location() {
        let store = FileStore::default_location();
        assert!(store.dir().ends_with("digger/saves"));
    }
}
