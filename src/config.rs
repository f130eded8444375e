//! Configuration management for gong
//!
//! Loads global settings and backup job definitions from a configuration file
//! (TOML, YAML or JSON, chosen by extension), with `GONG__`-prefixed
//! environment variables layered on top.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::storage::StorageConfig;

/// Source type currently understood by the backup runner
pub const FILES_SOURCE: &str = "files";

/// Complete application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Settings shared by every job
#[derive(Debug, Deserialize, Clone)]
pub struct GlobalConfig {
    /// Default log filter, overridden by RUST_LOG
    /// Environment: GONG__GLOBAL__LOG_LEVEL
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// A backup job: what to copy and where to
#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    pub source: SourceConfig,

    pub destination: StorageConfig,
}

/// What a job backs up
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,

    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// File or directory names skipped while mirroring
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_source_type() -> String {
    FILES_SOURCE.to_string()
}

impl AppConfig {
    /// Load configuration from `path` with environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("GONG")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a job by name
    pub fn job(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|job| job.name == name)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for (i, job) in self.jobs.iter().enumerate() {
            if job.name.is_empty() {
                return Err(ConfigError::Message(format!("job {i}: name is required")));
            }

            if !names.insert(job.name.as_str()) {
                return Err(ConfigError::Message(format!(
                    "duplicate job name: {}",
                    job.name
                )));
            }

            if job.source.source_type.is_empty() {
                return Err(ConfigError::Message(format!(
                    "job {}: source type is required",
                    job.name
                )));
            }

            if job.source.source_type != FILES_SOURCE {
                return Err(ConfigError::Message(format!(
                    "job {}: unsupported source type {:?}",
                    job.name, job.source.source_type
                )));
            }

            if job.destination.provider_type.is_empty() {
                return Err(ConfigError::Message(format!(
                    "job {}: destination type is required",
                    job.name
                )));
            }

            if job.source.paths.is_empty() {
                return Err(ConfigError::Message(format!(
                    "job {}: at least one source path is required",
                    job.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_toml(content: &str) -> Result<AppConfig, ConfigError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gong.toml");
        fs::write(&path, content).unwrap();
        AppConfig::load(&path)
    }

    #[test]
    fn test_load_applies_defaults() {
        let config = load_toml(
            r#"
            [[jobs]]
            name = "documents"

            [jobs.source]
            paths = ["/home/user/documents"]

            [jobs.destination]
            type = "local"
            endpoint = "/mnt/backup"
            "#,
        )
        .unwrap();

        assert_eq!(config.global.log_level, "info");
        assert!(config.global.log_file.is_none());

        let job = config.job("documents").unwrap();
        assert!(job.enabled);
        assert_eq!(job.source.source_type, "files");
        assert!(job.source.exclude.is_empty());
        assert_eq!(job.destination.provider_type, "local");
        assert_eq!(job.destination.endpoint, "/mnt/backup");
    }

    #[test]
    fn test_load_global_section() {
        let config = load_toml(
            r#"
            [global]
            log_level = "debug"
            log_file = "/var/log/gong.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.global.log_level, "debug");
        assert_eq!(config.global.log_file, Some(PathBuf::from("/var/log/gong.log")));
        assert!(config.jobs.is_empty());
    }

    #[test]
    fn test_duplicate_job_names_rejected() {
        let err = load_toml(
            r#"
            [[jobs]]
            name = "same"
            source = { paths = ["/a"] }
            destination = { type = "local" }

            [[jobs]]
            name = "same"
            source = { paths = ["/b"] }
            destination = { type = "local" }
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("duplicate job name: same"));
    }

    #[test]
    fn test_missing_source_paths_rejected() {
        let err = load_toml(
            r#"
            [[jobs]]
            name = "empty"
            source = { paths = [] }
            destination = { type = "local" }
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("at least one source path is required"));
    }

    #[test]
    fn test_missing_destination_type_rejected() {
        let err = load_toml(
            r#"
            [[jobs]]
            name = "nowhere"
            source = { paths = ["/a"] }
            destination = { endpoint = "/b" }
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("destination type is required"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
