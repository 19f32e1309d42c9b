//! File-backed key-value store with atomic writes
//!
//! Each key maps to one JSON file inside a directory. Writes go to a temp
//! file that is synced and then renamed over the target, so a value is either
//! completely replaced or left untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::{ExpenseError, ExpenseResult};

use super::kv::KeyValueStore;

/// Key-value store keeping one file per key
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a namespaced key such as `@App:items` to a portable file stem
fn file_stem(key: &str) -> String {
    key.trim_start_matches('@')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        let path = self.path_for(key);

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExpenseError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> ExpenseResult<()> {
        let path = self.path_for(key);

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            ExpenseError::Persistence(format!(
                "Failed to create directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        // Temp file must live in the same directory for the rename to be atomic
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| ExpenseError::Persistence(format!("Failed to create temp file: {}", e)))?;

        file.write_all(value.as_bytes())
            .await
            .map_err(|e| ExpenseError::Persistence(format!("Failed to write data: {}", e)))?;

        file.flush()
            .await
            .map_err(|e| ExpenseError::Persistence(format!("Failed to flush data: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| ExpenseError::Persistence(format!("Failed to sync data: {}", e)))?;

        drop(file);

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ExpenseError::Persistence(format!(
                "Failed to rename temp file: {}",
                e
            )));
        }

        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> ExpenseResult<()> {
        let path = self.path_for(key);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExpenseError::Persistence(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
