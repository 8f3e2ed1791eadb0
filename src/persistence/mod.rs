//! JSON file persistence for the leaderboard and settings
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write leaves the previous file intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while loading or saving a record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Read and decode a JSON record
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Encode and write a JSON record, creating parent directories as needed
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| PersistenceError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(())
}

/// Load a record, falling back to `T::default()` when it is missing or corrupt
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    match load_json(path) {
        Ok(value) => {
            log::info!("Loaded {what} from {}", path.display());
            value
        }
        Err(e) if e.is_not_found() => {
            log::info!("No {what} at {}, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("Could not load {what}: {e}; using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        value: u32,
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skyflap-persist-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("nested").join("record.json");
        let record = Record {
            name: "alice".into(),
            value: 7,
        };
        save_json(&path, &record).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(load_json::<Record>(&path).unwrap(), record);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = load_json::<Record>(&dir.join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
        let fallback: Record = load_or_default(&dir.join("nope.json"), "record");
        assert_eq!(fallback, Record::default());
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_json::<Record>(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Json(_)));
        let fallback: Record = load_or_default(&path, "record");
        assert_eq!(fallback, Record::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
