//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;

use crate::config::GlobalConfig;

/// Setup logging from the global configuration.
///
/// `RUST_LOG` takes precedence over the configured level. When a log file is
/// configured, records are appended to it instead of stderr.
pub fn setup_logging(global: &GlobalConfig) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(&global.log_level));

    if let Some(path) = &global.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (e.g. by a test harness)
    let _ = builder.try_init();
    Ok(())
}
