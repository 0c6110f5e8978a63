//! File-backed key-value storage
//!
//! Each key is stored as `<data_dir>/<key>.json`. Writes go to a temporary
//! file which is then renamed over the target, so a value is never left
//! partially written.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::{validate_key, KeyValueStore};

/// Key-value store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store in `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the entries
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Total size in bytes of all stored entries
    pub fn total_size(&self) -> StorageResult<u64> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| StorageError::from_io(e, self.dir.clone()))?;

        let mut total = 0;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                total += entry.metadata()?.len();
            }
        }
        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(&path, value.as_bytes())?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "Removed value");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
