use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{KeyValueStore, Result, StoreError};

/// JSON object on disk, e.g. `{ "score": 35 }`
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

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Read the whole object; a missing file is an empty object
    fn read_map(&self) -> Result<Map<String, Value>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(&self.path, e)),
        };
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&json)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn load_int(&self, key: &str) -> Result<u64> {
        let map = self.read_map()?;
        match map.get(key) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| StoreError::Corrupt {
                path: self.path.clone(),
                key: key.to_string(),
            }),
        }
    }

    fn store_int(&mut self, key: &str, value: u64) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::from(value));
        let json = serde_json::to_string_pretty(&map)?;

        // Write the new contents beside the old, then swap them in
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| self.io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&self.path, e))?;
        log::trace!("Stored {}={} in {}", key, value, self.path.display());
        Ok(())
    }
}
