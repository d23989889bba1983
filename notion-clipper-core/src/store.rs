//! File-backed [`ConfigStore`]: a JSON object used as a small key-value store.
//!
//! The credential record is kept under [`STORAGE_KEY`]. Other keys in the file are left
//! untouched by `set` and `clear`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::contract::{ConfigStore, NotionConfig, StoreError};

pub const STORAGE_KEY: &str = "notionConfig";

pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Config store file does not exist yet");
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            error!(error = ?e, path = %self.path.display(), "Failed to read config store");
            StoreError::Io(e)
        })?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Parse(format!(
                "expected a JSON object, found {other}"
            ))),
            Err(e) => {
                error!(error = ?e, path = %self.path.display(), "Failed to parse config store");
                Err(StoreError::Parse(e.to_string()))
            }
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!(path = %parent.display(), "Created config store directory");
            }
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            error!(error = ?e, path = %self.path.display(), "Failed to write config store");
            StoreError::Io(e)
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self) -> Result<Option<NotionConfig>, StoreError> {
        let map = self.read_map()?;
        match map.get(STORAGE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let config: NotionConfig = serde_json::from_value(value.clone())
                    .map_err(|e| StoreError::Parse(e.to_string()))?;
                config.trace_loaded("store");
                Ok(Some(config))
            }
        }
    }

    fn set(&self, config: &NotionConfig) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        let value = serde_json::to_value(config).map_err(|e| StoreError::Parse(e.to_string()))?;
        map.insert(STORAGE_KEY.to_string(), value);
        self.write_map(&map)?;
        info!(
            path = %self.path.display(),
            database_id = %config.database_id,
            "Saved Notion config"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(STORAGE_KEY).is_none() {
            debug!(path = %self.path.display(), "No Notion config stored, nothing to clear");
            return Ok(());
        }
        self.write_map(&map)?;
        info!(path = %self.path.display(), "Cleared Notion config");
        Ok(())
    }
}
