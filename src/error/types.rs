//! Error types
//!
//! Defines the error channel of every storage provider operation and of the
//! backup runner built on top of it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type returned by every storage provider operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage provider errors.
///
/// Every variant renders a non-empty message, so the `Display` output of an
/// error is always usable as the failure text of an operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to local storage {}: {reason}", .root.display())]
    Connect { root: PathBuf, reason: String },

    #[error("{provider} storage is not connected")]
    NotConnected { provider: &'static str },

    #[error("Source file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Remote file does not exist: {0}")]
    RemoteNotFound(String),

    #[error("Path does not exist: {0}")]
    PathNotFound(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Error checking if path exists {path}: {source}")]
    Exists { path: String, source: io::Error },

    #[error("Failed to get file info for {path}: {source}")]
    Metadata { path: String, source: io::Error },

    #[error("Cannot open source file {}: {source}", .path.display())]
    OpenSource { path: PathBuf, source: io::Error },

    #[error("Cannot create destination file {}: {source}", .path.display())]
    CreateDestination { path: PathBuf, source: io::Error },

    #[error("Source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("Copy operation failed from {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("Upload failed: {0}")]
    Upload(#[source] Box<StorageError>),

    #[error("Download failed: {0}")]
    Download(#[source] Box<StorageError>),

    #[error("Couldn't create directory {path}: {source}")]
    CreateDirectory { path: String, source: io::Error },

    #[error("Failed to delete {path}: {source}")]
    Delete { path: String, source: io::Error },

    #[error("Failed to list directory {path}: {source}")]
    ListDirectory { path: String, source: io::Error },

    #[error("Unknown storage provider type: {0:?}")]
    UnknownProvider(String),
}

/// Backup runner errors
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to read source {}: {source}", .path.display())]
    Source { path: PathBuf, source: io::Error },

    #[error("Backup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_upload_error_is_prefixed() {
        let err = StorageError::Upload(Box::new(StorageError::SourceNotFound(PathBuf::from(
            "/nonexistent/src",
        ))));
        assert_eq!(
            err.to_string(),
            "Upload failed: Source file does not exist: /nonexistent/src"
        );
    }

    #[test]
    fn test_messages_are_never_empty() {
        let errors = [
            StorageError::NotConnected { provider: "local" },
            StorageError::RemoteNotFound(String::new()),
            StorageError::PathNotFound(String::new()),
            StorageError::UnknownProvider(String::new()),
            StorageError::CreateDirectory {
                path: String::new(),
                source: io::Error::from(io::ErrorKind::AlreadyExists),
            },
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_result_states_are_exclusive() {
        let ok: StorageResult<bool> = Ok(false);
        assert!(ok.is_ok() && !ok.is_err());

        let failed: StorageResult<()> = Err(StorageError::PathNotFound("missing".into()));
        assert!(failed.is_err() && !failed.is_ok());
        assert_eq!(
            failed.unwrap_err().to_string(),
            "Path does not exist: missing"
        );
    }

    #[test]
    #[should_panic(expected = "RemoteNotFound")]
    fn test_value_access_on_failure_panics() {
        let failed: StorageResult<u64> = Err(StorageError::RemoteNotFound("gone.bin".into()));
        failed.unwrap();
    }
}
