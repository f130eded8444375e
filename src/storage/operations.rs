//! Filesystem provider extensions
//!
//! Delete and list operations only the filesystem backend offers. They are
//! inherent methods, not part of the provider contract.

use log::info;
use std::fs;

use crate::error::{StorageError, StorageResult};
use crate::storage::filesystem::FileSystemProvider;
use crate::storage::types::FileInfo;

impl FileSystemProvider {
    /// Deletes a single file
    pub fn delete_file(&self, path: &str) -> StorageResult<()> {
        self.ensure_connected()?;

        let full_path = self.resolve(path);
        if self.metadata_of(path, &full_path)?.is_dir() {
            return Err(StorageError::NotAFile(path.to_string()));
        }

        fs::remove_file(&full_path).map_err(|source| StorageError::Delete {
            path: path.to_string(),
            source,
        })?;

        info!("Deleted file {path} (real: {})", full_path.display());
        Ok(())
    }

    /// Lists the entries of one directory, sorted by path
    pub fn list_directory(&self, path: &str) -> StorageResult<Vec<FileInfo>> {
        self.ensure_connected()?;

        let full_path = self.resolve(path);
        if !self.metadata_of(path, &full_path)?.is_dir() {
            return Err(StorageError::NotADirectory(path.to_string()));
        }

        let list_error = |source: std::io::Error| StorageError::ListDirectory {
            path: path.to_string(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            let name = entry.file_name().to_string_lossy().to_string();
            let entry_path = if path.is_empty() {
                name
            } else {
                format!("{}/{}", path.trim_end_matches('/'), name)
            };

            let metadata = entry.metadata().map_err(list_error)?;
            entries.push(self.file_info(entry_path, &metadata)?);
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Deletes a directory, and everything below it when `recursive` is set
    pub fn delete_directory(&self, path: &str, recursive: bool) -> StorageResult<()> {
        self.ensure_connected()?;

        let full_path = self.resolve(path);
        if !self.metadata_of(path, &full_path)?.is_dir() {
            return Err(StorageError::NotADirectory(path.to_string()));
        }

        let removed = if recursive {
            fs::remove_dir_all(&full_path)
        } else {
            fs::remove_dir(&full_path)
        };
        removed.map_err(|source| StorageError::Delete {
            path: path.to_string(),
            source,
        })?;

        info!("Deleted directory {path} (real: {})", full_path.display());
        Ok(())
    }
}
