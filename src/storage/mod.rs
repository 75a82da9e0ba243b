// src/storage/mod.rs
use crate::utils::error::StorageError;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing to `output_path`. Parent directories
    /// are created on first save.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// Writes `items` as one pretty-printed JSON array (UTF-8, non-ASCII kept literally).
    pub fn save_batch<T: Serialize>(&self, items: &[T]) -> Result<PathBuf, StorageError> {
        if let Some(parent) = self.output_path.parent() {
            // Create the directories if they don't exist
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(StorageError::IoError)?;
            }
        }

        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let mut file = fs::File::create(&self.output_path).map_err(StorageError::IoError)?;
        file.write_all(json.as_bytes()).map_err(StorageError::IoError)?;
        file.write_all(b"\n").map_err(StorageError::IoError)?;

        tracing::info!("Saved {} items to {}", items.len(), self.output_path.display());
        Ok(self.output_path.clone())
    }
}

/// Reads any JSON document. The caller decides which top-level shape it accepts.
pub fn load_json(path: &Path) -> Result<Value, StorageError> {
    let content = fs::read_to_string(path).map_err(StorageError::IoError)?;
    serde_json::from_str(&content).map_err(|e| StorageError::MalformedJson {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_creates_parent_dirs_and_keeps_umlauts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("berufe.json");
        let storage = StorageManager::new(&path);

        let items = vec![json!({ "name": "Schriftliche Prüfung" })];
        let written = storage.save_batch(&items).unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Schriftliche Prüfung"), "non-ASCII must not be escaped");
        assert!(content.contains("\n  {"), "expected indented output: {}", content);
        assert_eq!(load_json(&path).unwrap(), json!(items));
    }

    #[test]
    fn test_save_empty_batch_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leer.json");
        StorageManager::new(&path).save_batch::<Value>(&[]).unwrap();
        assert_eq!(load_json(&path).unwrap(), json!([]));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kaputt.json");
        fs::write(&path, "[{").unwrap();
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, StorageError::MalformedJson { .. }));
    }
}
