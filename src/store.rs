use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;

/// String key-value persistence, in the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every `get` re-reads the file and every `set` rewrites it whole, so two
/// processes sharing the file see last-writer-wins semantics.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(file) => Ok(serde_json::from_str(&file)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        serde_json::to_writer(&std::fs::File::create(&self.path)?, &entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("favorites", "[\"bitcoin\"]").unwrap();
        assert_eq!(
            store.get("favorites").unwrap(),
            Some("[\"bitcoin\"]".to_string())
        );
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::new(&path);
        store.set("favorites", "[\"ethereum\"]").unwrap();
        store.set("other", "1").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("favorites").unwrap(),
            Some("[\"ethereum\"]".to_string())
        );
        assert_eq!(reopened.get("other").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_file_store_last_writer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut first = FileStore::new(&path);
        let mut second = FileStore::new(&path);
        first.set("favorites", "[\"a\"]").unwrap();
        second.set("favorites", "[\"b\"]").unwrap();

        assert_eq!(first.get("favorites").unwrap(), Some("[\"b\"]".to_string()));
    }

    #[test]
    fn test_file_store_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("favorites").is_err());
    }
}
