pub mod backup;
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

pub use error::{BackupError, StorageError, StorageResult};
pub use storage::{
    FileInfo, FileSystemProvider, ProgressCallback, StorageConfig, StorageProvider,
    create_provider,
};
