use std::fs;
use std::path::PathBuf;

use gong::StorageConfig;
use gong::backup::{JobReport, run_job, run_jobs};
use gong::config::{JobConfig, SourceConfig};

fn job(name: &str, paths: Vec<PathBuf>, exclude: &[&str], destination: &str) -> JobConfig {
    JobConfig {
        name: name.to_string(),
        description: String::new(),
        enabled: true,
        source: SourceConfig {
            source_type: "files".to_string(),
            paths,
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        },
        destination: StorageConfig::local(destination),
    }
}

#[test]
fn test_run_job_mirrors_tree() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();

    let project = source.path().join("project");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::create_dir_all(project.join("target")).unwrap();
    fs::write(project.join("README"), b"readme").unwrap();
    fs::write(project.join("src/main.rs"), b"fn main() {}").unwrap();
    fs::write(project.join("target/out"), b"ignored").unwrap();
    let notes = source.path().join("notes.txt");
    fs::write(&notes, b"notes").unwrap();

    let report = run_job(&job(
        "nightly",
        vec![project, notes],
        &["target"],
        dest.path().to_str().unwrap(),
    ))
    .unwrap();

    assert_eq!(
        report,
        JobReport {
            job: "nightly".to_string(),
            files: 3,
            directories: 3,
            bytes: 6 + 12 + 5,
            skipped: 1,
        }
    );

    let mirrored = dest.path().join("nightly");
    assert_eq!(fs::read(mirrored.join("project/src/main.rs")).unwrap(), b"fn main() {}");
    assert_eq!(fs::read(mirrored.join("notes.txt")).unwrap(), b"notes");
    assert!(!mirrored.join("project/target").exists());
}

#[test]
fn test_run_job_reuses_existing_job_directory() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let file = source.path().join("a.txt");
    fs::write(&file, b"a").unwrap();
    fs::create_dir(dest.path().join("again")).unwrap();

    let report = run_job(&job("again", vec![file], &[], dest.path().to_str().unwrap())).unwrap();

    assert_eq!(report.directories, 0);
    assert_eq!(report.files, 1);
}

#[test]
fn test_run_job_missing_destination_root() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let missing = dest.path().join("missing");

    let err = run_job(&job(
        "broken",
        vec![source.path().to_path_buf()],
        &[],
        missing.to_str().unwrap(),
    ))
    .unwrap_err();

    assert!(err.to_string().starts_with("Failed to connect to local storage"));
}

#[test]
fn test_run_job_missing_source() {
    let dest = tempfile::tempdir().unwrap();

    let err = run_job(&job(
        "ghost",
        vec![PathBuf::from("/nonexistent/gong/source")],
        &[],
        dest.path().to_str().unwrap(),
    ))
    .unwrap_err();

    assert!(err.to_string().starts_with("Failed to read source"));
}

#[test]
fn test_run_job_unknown_provider() {
    let mut config = job("cloud", vec![PathBuf::from("/tmp")], &[], "");
    config.destination.provider_type = "s3".to_string();

    let err = run_job(&config).unwrap_err();
    assert_eq!(err.to_string(), "Unknown storage provider type: \"s3\"");
}

#[tokio::test]
async fn test_run_jobs_skips_disabled() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let file = source.path().join("data");
    fs::write(&file, b"1234").unwrap();
    let root = dest.path().to_str().unwrap();

    let mut disabled = job("off", vec![file.clone()], &[], root);
    disabled.enabled = false;
    let jobs = vec![
        job("first", vec![file.clone()], &[], root),
        disabled,
        job("second", vec![file], &[], root),
    ];

    let outcomes = run_jobs(jobs).await;

    let names: Vec<&str> = outcomes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
    for (_, outcome) in &outcomes {
        assert_eq!(outcome.as_ref().unwrap().bytes, 4);
    }
    assert!(!dest.path().join("off").exists());
}

#[test]
fn test_run_job_skips_its_own_destination() {
    let source = tempfile::tempdir().unwrap();
    fs::write(source.path().join("data.txt"), b"data").unwrap();
    let backup = source.path().join("backup");
    fs::create_dir(&backup).unwrap();

    let report = run_job(&job(
        "home",
        vec![source.path().to_path_buf()],
        &[],
        backup.to_str().unwrap(),
    ))
    .unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(report.skipped, 1);

    let name = source.path().file_name().unwrap();
    let mirrored = backup.join("home").join(name);
    assert_eq!(fs::read(mirrored.join("data.txt")).unwrap(), b"data");
    assert!(mirrored.join("backup").is_dir());
    assert!(!mirrored.join("backup/home").exists());
}

#[cfg(unix)]
#[test]
fn test_run_job_skips_nested_symlinks() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let tree = source.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("file"), b"x").unwrap();
    std::os::unix::fs::symlink(&tree, tree.join("loop")).unwrap();

    let report = run_job(&job("links", vec![tree], &[], dest.path().to_str().unwrap())).unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(report.skipped, 1);
    assert!(!dest.path().join("links/tree/loop").exists());
}
