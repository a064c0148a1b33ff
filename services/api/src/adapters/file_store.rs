//! services/api/src/adapters/file_store.rs
//!
//! This module contains the file-backed storage adapter, the concrete implementation
//! of the `KeyValueStore` port used in production. Every key is one JSON document
//! under the configured data directory.

use async_trait::async_trait;
use cloutline_core::ports::{KeyValueStore, PortError, PortResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that keeps each document in `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a new `JsonFileStore`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PortError::Unexpected(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Writes to a sibling temp file first so a crash never leaves half a document.
    async fn put(&self, key: &str, value: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            PortError::Unexpected(format!(
                "failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await.map_err(|e| {
            PortError::Unexpected(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            PortError::Unexpected(format!("failed to replace {}: {}", path.display(), e))
        })?;

        debug!(key, bytes = value.len(), "document written");
        Ok(())
    }
}
