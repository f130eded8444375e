//! Backup job execution
//!
//! Mirrors a job's source paths into its destination provider under a
//! directory named after the job.

use log::{error, info, trace, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::JobConfig;
use crate::error::BackupError;
use crate::storage::filesystem::{self, FileSystemProvider};
use crate::storage::{StorageConfig, StorageProvider, create_provider};

/// Outcome of a completed backup job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub job: String,
    /// Files uploaded
    pub files: u64,
    /// Directories created in the destination, including the job directory
    pub directories: u64,
    /// Bytes uploaded
    pub bytes: u64,
    /// Source entries skipped by the exclude list
    pub skipped: u64,
}

struct Mirror<'a> {
    provider: &'a dyn StorageProvider,
    exclude: &'a [String],
    /// Canonical job directory when the destination lives on the local
    /// filesystem; sources at or below it are never mirrored.
    destination: Option<PathBuf>,
    report: JobReport,
}

/// Runs a single backup job to completion.
///
/// The destination provider is always disconnected before returning, whether
/// or not the job succeeded.
pub fn run_job(job: &JobConfig) -> Result<JobReport, BackupError> {
    let mut provider = create_provider(&job.destination)?;
    provider.connect()?;

    info!(
        "Starting backup job {} -> {} storage",
        job.name,
        provider.provider_name()
    );

    let result = mirror_job(provider.as_ref(), job);
    provider.disconnect()?;

    match &result {
        Ok(report) => info!(
            "Backup job {} completed: {} files, {} directories, {} bytes, {} skipped",
            report.job, report.files, report.directories, report.bytes, report.skipped
        ),
        Err(e) => error!("Backup job {} failed: {e}", job.name),
    }

    result
}

fn mirror_job(provider: &dyn StorageProvider, job: &JobConfig) -> Result<JobReport, BackupError> {
    let mut mirror = Mirror {
        provider,
        exclude: &job.source.exclude,
        destination: None,
        report: JobReport {
            job: job.name.clone(),
            ..JobReport::default()
        },
    };

    mirror.ensure_directory(&job.name)?;
    mirror.destination = local_job_directory(&job.destination, &job.name);

    for source in &job.source.paths {
        let Some(name) = source.file_name() else {
            warn!("Skipping source without a file name: {}", source.display());
            mirror.report.skipped += 1;
            continue;
        };
        let target = format!("{}/{}", job.name, name.to_string_lossy());
        mirror.copy_entry(source, &target, true)?;
    }

    Ok(mirror.report)
}

/// Filesystem location of the job directory for a `local` destination
fn local_job_directory(destination: &StorageConfig, job: &str) -> Option<PathBuf> {
    if destination.provider_type != filesystem::PROVIDER_NAME {
        return None;
    }

    FileSystemProvider::new(&destination.endpoint)
        .base_path()
        .join(job)
        .canonicalize()
        .ok()
}

impl Mirror<'_> {
    fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.exclude.iter().any(|ex| name == ex.as_str()))
            .unwrap_or(false)
    }

    fn ensure_directory(&mut self, remote: &str) -> Result<(), BackupError> {
        if !self.provider.exists(remote)? {
            self.provider.create_directory(remote)?;
            self.report.directories += 1;
        }
        Ok(())
    }

    fn is_inside_destination(&self, source: &Path) -> bool {
        match (&self.destination, source.canonicalize()) {
            (Some(destination), Ok(source)) => source.starts_with(destination),
            _ => false,
        }
    }

    /// Mirrors one source entry. Symlinks are only followed for configured
    /// top-level sources; nested links and special files are skipped.
    fn copy_entry(
        &mut self,
        source: &Path,
        remote: &str,
        follow_links: bool,
    ) -> Result<(), BackupError> {
        if self.is_excluded(source) {
            trace!("Excluded {}", source.display());
            self.report.skipped += 1;
            return Ok(());
        }

        let metadata = if follow_links {
            fs::metadata(source)
        } else {
            fs::symlink_metadata(source)
        }
        .map_err(|e| BackupError::Source {
            path: source.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_dir() && !metadata.is_file() {
            warn!("Skipping symlink or special file {}", source.display());
            self.report.skipped += 1;
            return Ok(());
        }

        if self.is_inside_destination(source) {
            warn!(
                "Skipping {}: it is inside the backup destination",
                source.display()
            );
            self.report.skipped += 1;
            return Ok(());
        }

        if metadata.is_dir() {
            self.copy_directory(source, remote)
        } else {
            self.copy_file(source, remote)
        }
    }

    fn copy_directory(&mut self, source: &Path, remote: &str) -> Result<(), BackupError> {
        self.ensure_directory(remote)?;

        let read_error = |e: std::io::Error| BackupError::Source {
            path: source.to_path_buf(),
            source: e,
        };

        let mut children = Vec::new();
        for entry in fs::read_dir(source).map_err(read_error)? {
            children.push(entry.map_err(read_error)?.path());
        }
        children.sort();

        for child in children {
            let Some(name) = child.file_name() else {
                continue;
            };
            let target = format!("{remote}/{}", name.to_string_lossy());
            self.copy_entry(&child, &target, false)?;
        }

        Ok(())
    }

    fn copy_file(&mut self, source: &Path, remote: &str) -> Result<(), BackupError> {
        let mut uploaded = 0u64;
        let mut progress = |done: u64, total: u64| {
            trace!("{remote}: {done}/{total} bytes");
            uploaded = done;
        };

        self.provider
            .upload_file(source, remote, Some(&mut progress))?;

        self.report.files += 1;
        self.report.bytes += uploaded;
        Ok(())
    }
}
