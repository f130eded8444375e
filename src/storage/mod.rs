//! Storage providers
//!
//! The provider contract, its filesystem implementation and the factory
//! selecting a provider from configuration.

pub mod copy;
pub mod factory;
pub mod filesystem;
pub mod operations;
pub mod provider;
pub mod types;
pub mod validation;

pub use factory::create_provider;
pub use filesystem::FileSystemProvider;
pub use provider::StorageProvider;
pub use types::{FileInfo, ProgressCallback, StorageConfig};
