use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{AppError, Result};

/// Store backed by a single JSON object on disk.
///
/// Each call re-reads the file, so separate handles (or processes) pointing
/// at the same path see each other's writes, last write wins.
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

    fn load(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        let document: Value = serde_json::from_str(&raw)?;
        match document {
            Value::Object(map) => Ok(map),
            other => Err(AppError::CorruptValue {
                key: self.path.display().to_string(),
                reason: format!("expected a JSON object, found {}", type_name(&other)),
            }),
        }
    }

    fn save(&self, map: Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling file first so a crash never leaves half a document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&Value::Object(map))?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved store to {}", self.path.display());
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.save(map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(map)?;
        }
        Ok(())
    }
}
