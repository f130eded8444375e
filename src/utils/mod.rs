//! Utility functions
//!
//! Shared helpers used across the crate.

pub mod logging;

pub use logging::setup_logging;
