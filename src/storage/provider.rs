//! Storage provider contract
//!
//! The capability set every storage backend implements. All operations are
//! synchronous and report failure through [`StorageResult`], never by panicking.

use std::path::Path;

use crate::error::StorageResult;
use crate::storage::types::{FileInfo, ProgressCallback};

/// A storage backend.
///
/// Providers start disconnected. Data operations fail with
/// [`StorageError::NotConnected`](crate::error::StorageError::NotConnected)
/// until [`connect`](StorageProvider::connect) succeeds. An instance is not
/// meant to be shared between threads without external synchronisation; use
/// one instance per thread or task instead.
pub trait StorageProvider: Send {
    /// Verify the backend is reachable and mark the provider connected.
    ///
    /// Calling it again re-validates the backend.
    fn connect(&mut self) -> StorageResult<()>;

    /// Mark the provider disconnected. Always succeeds.
    fn disconnect(&mut self) -> StorageResult<()>;

    /// Check whether `path` exists. A missing path is `Ok(false)`, not an error.
    fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Copy the local file `local_path` into the provider at `remote_path`.
    fn upload_file(
        &self,
        local_path: &Path,
        remote_path: &str,
        progress: Option<ProgressCallback<'_>>,
    ) -> StorageResult<()>;

    /// Copy the provider file `remote_path` to the local file `local_path`.
    fn download_file(
        &self,
        remote_path: &str,
        local_path: &Path,
        progress: Option<ProgressCallback<'_>>,
    ) -> StorageResult<()>;

    /// Create a single directory level at `path`.
    fn create_directory(&self, path: &str) -> StorageResult<()>;

    /// Retrieve metadata for `path`.
    fn get_file_info(&self, path: &str) -> StorageResult<FileInfo>;

    /// Constant identity of the backend, e.g. `local`.
    fn provider_name(&self) -> &'static str;

    fn is_connected(&self) -> bool;
}
