//! Errors from the key-value store
//!
//! I/O failures are classified by cause so the CLI can tell the user what to
//! do about them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory or an entry's parent could not be created
    #[error("Cannot create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No permission to access '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of disk space while writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read entry '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write entry '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key contains characters that cannot name a storage entry
    #[error("Invalid storage key '{key}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey { key: String },

    /// Stored value cannot be parsed
    #[error("Invalid value stored under '{key}': {details}")]
    InvalidFormat { key: String, details: String },

    #[error("Cannot encode value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The temp file was written but could not replace the entry
    #[error("Cannot replace '{to}' with '{from}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Classify an I/O error on `path`
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => StorageError::ReadError {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// What the user can do about this error, if anything
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. } => Some(
                "Check the permissions of the data directory, or pick another one with \
                 `folio config set data_dir PATH`.",
            ),
            StorageError::InvalidFormat { .. } => {
                Some("The entry is replaced with defaults on the next save.")
            }
            StorageError::InvalidKey { .. } => {
                Some("Keys may only use ASCII letters, digits, '-' and '_'.")
            }
            _ => None,
        }
    }
}

/// Some platforms report a full disk only through the message text
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
