//! Storage data types
//!
//! Defines the metadata model, the progress callback and the provider
//! configuration record shared by every storage backend.

use std::collections::HashMap;
use std::time::SystemTime;

use serde::Deserialize;

/// Progress observer handed to transfer operations.
///
/// Called with `(bytes_transferred, bytes_total)` on the calling thread after
/// every chunk written, so it must return quickly.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(u64, u64);

/// Metadata describing a file or directory held by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path as supplied by the caller (or joined from a listing).
    pub path: String,
    /// Size in bytes, 0 for directories.
    pub size: u64,
    /// Last modification time reported by the backend.
    pub modified: SystemTime,
    pub is_directory: bool,
    /// Content checksum, `None` when not computed.
    pub checksum: Option<String>,
}

impl FileInfo {
    /// Create metadata for a regular file
    pub fn file(path: impl Into<String>, size: u64, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            size,
            modified,
            is_directory: false,
            checksum: None,
        }
    }

    /// Create metadata for a directory
    pub fn directory(path: impl Into<String>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            size: 0,
            modified,
            is_directory: true,
            checksum: None,
        }
    }
}

/// Configuration record used to construct a provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Provider tag, e.g. `local`.
    #[serde(rename = "type", alias = "provider_type")]
    pub provider_type: String,
    /// Backend location. For the `local` provider this is the root directory.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub bucket_name: String,
    /// Provider-specific options
    pub options: HashMap<String, String>,
}

impl StorageConfig {
    /// Configuration for a filesystem provider rooted at `root`
    pub fn local(root: impl Into<String>) -> Self {
        Self {
            provider_type: "local".to_string(),
            endpoint: root.into(),
            ..Self::default()
        }
    }
}
