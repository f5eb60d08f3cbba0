use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Backing storage for the serialized high-score table.
///
/// Stores hold one opaque string under one key. `load` returns `None` when
/// nothing has been written yet.
pub trait ScoreStore {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, raw: &str) -> Result<()>;
}

/// File-backed store; the whole file is replaced on every save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high scores from {:?}", self.path))?;
        Ok(Some(raw))
    }

    fn save(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write high scores to {:?}", self.path))
    }
}

/// In-process store, used when no file is configured
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        let guard = self
            .raw
            .lock()
            .map_err(|_| anyhow::anyhow!("high-score memory store poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        let mut guard = self
            .raw
            .lock()
            .map_err(|_| anyhow::anyhow!("high-score memory store poisoned"))?;
        *guard = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("scores.json"));

        store.save("[1]").unwrap();
        store.save("[2]").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("[]").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("[]"));
    }
}
