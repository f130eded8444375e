//! gong - Entry Point
//!
//! Fast, automated backup utility copying local files into pluggable storage
//! providers.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use gong::backup::run_jobs;
use gong::config::AppConfig;
use gong::utils::setup_logging;

#[derive(Parser)]
#[command(name = "gong", version, about = "Fast, automated backup utility")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every enabled backup job, or a single job by name
    Run {
        #[arg(long)]
        job: Option<String>,
    },
    /// List configured backup jobs
    Jobs,
    /// Print the version
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        println!("gong {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config {}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logging(&config.global) {
        eprintln!("failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Jobs => {
            for job in &config.jobs {
                let state = if job.enabled { "enabled" } else { "disabled" };
                println!(
                    "{}\t{}\t{} -> {}\t{}",
                    job.name,
                    state,
                    job.source.paths.len(),
                    job.destination.provider_type,
                    job.description
                );
            }
            ExitCode::SUCCESS
        }
        Command::Run { job } => {
            let jobs = match job {
                Some(name) => match config.job(&name) {
                    Some(job) => vec![job.clone()],
                    None => {
                        error!("No job named {name}");
                        return ExitCode::FAILURE;
                    }
                },
                None => config.jobs,
            };

            info!("Launching {} backup job(s)...", jobs.len());

            let mut failed = false;
            for (name, outcome) in run_jobs(jobs).await {
                if let Err(e) = outcome {
                    error!("Job {name} failed: {e}");
                    failed = true;
                }
            }

            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Version => ExitCode::SUCCESS,
    }
}
