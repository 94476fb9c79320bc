//! Session persistence for the terminal client.
//!
//! The identity keys are kept in one flat JSON object on disk. Reads of a
//! missing or malformed file behave as an empty store; write failures are
//! logged and dropped, matching how the browser treats blocked storage.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use booking::KeyValueStore;

/// [`KeyValueStore`] backed by a JSON file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
            BTreeMap::new()
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) {
        let result = if entries.is_empty() {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            }
        } else {
            serde_json::to_string_pretty(entries)
                .map_err(std::io::Error::other)
                .and_then(|raw| fs::write(&self.path, raw))
        };
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "session file not written");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read();
        if entries.remove(key).is_some() {
            self.write(&entries);
        }
    }
}
