//! Filesystem storage provider
//!
//! Implements the storage provider contract against a local or mounted
//! filesystem rooted at a fixed base path.

use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::storage::copy::copy_with_progress;
use crate::storage::provider::StorageProvider;
use crate::storage::types::{FileInfo, ProgressCallback};
use crate::storage::validation::resolve_path;

/// Provider tag of the filesystem backend
pub const PROVIDER_NAME: &str = "local";

/// Storage provider backed by the local filesystem
#[derive(Debug)]
pub struct FileSystemProvider {
    base_path: PathBuf,
    connected: bool,
}

impl FileSystemProvider {
    /// Create a disconnected provider rooted at `base_path`.
    ///
    /// An empty path roots the provider at the current working directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        let base_path = if base_path.as_os_str().is_empty() {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        } else {
            base_path
        };

        Self {
            base_path,
            connected: false,
        }
    }

    /// Root every relative path is resolved under
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub(crate) fn resolve(&self, path: &str) -> PathBuf {
        resolve_path(&self.base_path, path)
    }

    pub(crate) fn ensure_connected(&self) -> StorageResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(StorageError::NotConnected {
                provider: PROVIDER_NAME,
            })
        }
    }

    /// Metadata of a resolved path, mapping a missing path to `PathNotFound`.
    pub(crate) fn metadata_of(&self, path: &str, full_path: &Path) -> StorageResult<fs::Metadata> {
        fs::metadata(full_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::PathNotFound(path.to_string()),
            _ => StorageError::Metadata {
                path: path.to_string(),
                source,
            },
        })
    }

    pub(crate) fn file_info(
        &self,
        path: String,
        metadata: &fs::Metadata,
    ) -> StorageResult<FileInfo> {
        let modified = metadata
            .modified()
            .map_err(|source| StorageError::Metadata {
                path: path.clone(),
                source,
            })?;

        if metadata.is_dir() {
            Ok(FileInfo::directory(path, modified))
        } else {
            Ok(FileInfo::file(path, metadata.len(), modified))
        }
    }
}

impl Default for FileSystemProvider {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

impl StorageProvider for FileSystemProvider {
    fn connect(&mut self) -> StorageResult<()> {
        let failure = match fs::metadata(&self.base_path) {
            Ok(metadata) if metadata.is_dir() => None,
            Ok(_) => Some("not a directory".to_string()),
            Err(e) => Some(e.to_string()),
        };

        if let Some(reason) = failure {
            self.connected = false;
            return Err(StorageError::Connect {
                root: self.base_path.clone(),
                reason,
            });
        }

        self.connected = true;
        info!("Connected to local storage {}", self.base_path.display());
        Ok(())
    }

    fn disconnect(&mut self) -> StorageResult<()> {
        self.connected = false;
        info!("Disconnected from local storage");
        Ok(())
    }

    fn exists(&self, path: &str) -> StorageResult<bool> {
        self.ensure_connected()?;

        self.resolve(path)
            .try_exists()
            .map_err(|source| StorageError::Exists {
                path: path.to_string(),
                source,
            })
    }

    fn upload_file(
        &self,
        local_path: &Path,
        remote_path: &str,
        progress: Option<ProgressCallback<'_>>,
    ) -> StorageResult<()> {
        self.ensure_connected()?;

        let dst = self.resolve(remote_path);
        let transfer = || {
            if !local_path.exists() {
                return Err(StorageError::SourceNotFound(local_path.to_path_buf()));
            }
            if !local_path.is_file() {
                return Err(StorageError::NotAFile(local_path.display().to_string()));
            }
            copy_with_progress(local_path, &dst, progress).map(|_| ())
        };

        transfer().map_err(|e| StorageError::Upload(Box::new(e)))
    }

    fn download_file(
        &self,
        remote_path: &str,
        local_path: &Path,
        progress: Option<ProgressCallback<'_>>,
    ) -> StorageResult<()> {
        self.ensure_connected()?;

        let src = self.resolve(remote_path);
        let transfer = || {
            if !src.exists() {
                return Err(StorageError::RemoteNotFound(remote_path.to_string()));
            }
            if !src.is_file() {
                return Err(StorageError::NotAFile(remote_path.to_string()));
            }
            copy_with_progress(&src, local_path, progress).map(|_| ())
        };

        transfer().map_err(|e| StorageError::Download(Box::new(e)))
    }

    fn create_directory(&self, path: &str) -> StorageResult<()> {
        self.ensure_connected()?;

        fs::create_dir(self.resolve(path)).map_err(|source| StorageError::CreateDirectory {
            path: path.to_string(),
            source,
        })
    }

    fn get_file_info(&self, path: &str) -> StorageResult<FileInfo> {
        self.ensure_connected()?;

        let full_path = self.resolve(path);
        let metadata = self.metadata_of(path, &full_path)?;
        self.file_info(path.to_string(), &metadata)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
