//! Backup jobs
//!
//! Runs configured backup jobs against their destination providers.

pub mod runner;

pub use runner::{JobReport, run_job};

use log::info;

use crate::config::JobConfig;
use crate::error::BackupError;

/// Runs every enabled job on the blocking thread pool.
///
/// Each job gets its own provider instance. Outcomes are returned in job
/// order, paired with the job name; disabled jobs are left out.
pub async fn run_jobs(jobs: Vec<JobConfig>) -> Vec<(String, Result<JobReport, BackupError>)> {
    let mut handles = Vec::new();

    for job in jobs {
        if !job.enabled {
            info!("Skipping disabled job {}", job.name);
            continue;
        }

        let name = job.name.clone();
        handles.push((name, tokio::task::spawn_blocking(move || run_job(&job))));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(BackupError::from(e)),
        };
        outcomes.push((name, outcome));
    }

    outcomes
}
