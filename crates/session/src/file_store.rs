//! Session store persisted as one JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::StoreError;
use crate::store::SessionStore;

/// File-backed [`SessionStore`] for native shells.
///
/// The whole map is rewritten on every change. No change notifications:
/// concurrent writers are last-writer-wins.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StoreError::Io(format!("{}: {err}", self.path.display()))),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, data: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("{}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io(format!("{}: {e}", self.path.display())))
    }

    fn update<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut data = self.load()?;
        if mutate(&mut data) {
            self.save(&data)?;
        }
        Ok(())
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|data| data.insert(key.to_string(), value.to_string()).as_deref() != Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|data| data.remove(key).is_some())
    }
}
