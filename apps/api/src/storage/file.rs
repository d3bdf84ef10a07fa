use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::storage::{KeyValueStore, StorageError};

/// One file per key under a root directory.
///
/// Writes go to a sibling temp file and are renamed into place, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// File name for `key`. ':' is not portable in file names, so it is
    /// escaped as `%3A`; keys cannot contain '%', so distinct keys never share
    /// a file.
    fn file_name(key: &str) -> Result<String, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(key.replace(':', "%3A"))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(Self::file_name(key)?))
    }

    /// Keys never start with '.', so a temp file cannot shadow another key.
    fn temp_path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(format!(".{}.tmp", Self::file_name(key)?)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.temp_path_for(key)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
