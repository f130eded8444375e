//! Provider factory
//!
//! Builds a provider from a [`StorageConfig`] by its `type` tag.
//!
//! | tag     | provider               |
//! |---------|------------------------|
//! | `local` | [`FileSystemProvider`] |

use crate::error::{StorageError, StorageResult};
use crate::storage::filesystem::{self, FileSystemProvider};
use crate::storage::provider::StorageProvider;
use crate::storage::types::StorageConfig;

/// Create a disconnected provider for `config`
pub fn create_provider(config: &StorageConfig) -> StorageResult<Box<dyn StorageProvider>> {
    match config.provider_type.as_str() {
        filesystem::PROVIDER_NAME => Ok(Box::new(FileSystemProvider::new(&config.endpoint))),
        other => Err(StorageError::UnknownProvider(other.to_string())),
    }
}
