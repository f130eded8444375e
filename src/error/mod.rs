//! Error handling
//!
//! Defines error types for the storage providers and the backup runner.

pub mod types;

pub use types::*;
