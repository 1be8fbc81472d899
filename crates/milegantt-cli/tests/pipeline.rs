//! End-to-end CLI tests
//!
//! Each test runs the binary inside a fresh temporary directory so the
//! default file names (`projects.csv`, `gantt_chart.xlsx`,
//! `gantt_chart.html`, `milegantt.toml`) resolve there.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const PROJECT_CSV: &str = "\
milestone,start,end,owner,module
M1,20240101,20240105,A,X
M2,,20240110,B,
M3,20240111,20240115,C,Y
";

fn milegantt_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_milegantt"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(milegantt_binary())
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("MILEGANTT_CONFIG")
        .output()
        .expect("failed to execute milegantt")
}

fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("projects.csv"), PROJECT_CSV).unwrap();
    dir
}

#[test]
fn default_run_writes_both_outputs() {
    let dir = project_dir();
    let output = run_in(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let xlsx = fs::read(dir.path().join("gantt_chart.xlsx")).unwrap();
    assert_eq!(&xlsx[..2], b"PK");

    let html = fs::read_to_string(dir.path().join("gantt_chart.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Gantt Chart</title>"));
}

#[test]
fn explicit_paths_and_skip_flags() {
    let dir = project_dir();
    fs::rename(dir.path().join("projects.csv"), dir.path().join("plan.csv")).unwrap();

    let output = run_in(
        dir.path(),
        &["--input", "plan.csv", "--html", "timeline.html", "--no-xlsx"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("timeline.html").is_file());
    assert!(!dir.path().join("gantt_chart.xlsx").exists());
}

#[test]
fn config_in_working_directory_is_applied() {
    let dir = project_dir();
    fs::write(
        dir.path().join("milegantt.toml"),
        "title = \"Release Train\"\n[timeline]\nx_title = \"Calendar\"\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &["--no-xlsx"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let html = fs::read_to_string(dir.path().join("gantt_chart.html")).unwrap();
    assert!(html.contains("<title>Release Train</title>"));
    assert!(html.contains("Calendar"));
}

#[test]
fn config_path_from_environment() {
    let dir = project_dir();
    fs::write(dir.path().join("team.toml"), "title = \"From Env\"\n").unwrap();

    let output = Command::new(milegantt_binary())
        .current_dir(dir.path())
        .arg("--no-xlsx")
        .env_remove("RUST_LOG")
        .env("MILEGANTT_CONFIG", "team.toml")
        .output()
        .expect("failed to execute milegantt");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let html = fs::read_to_string(dir.path().join("gantt_chart.html")).unwrap();
    assert!(html.contains("<title>From Env</title>"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("projects.csv"), "stderr: {stderr}");
}

#[test]
fn invalid_date_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("projects.csv"),
        "milestone,start,end,owner,module\nM1,2024/01/01,20240105,A,X\n",
    )
    .unwrap();

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("YYYYMMDD"));
    assert!(!dir.path().join("gantt_chart.xlsx").exists());
    assert!(!dir.path().join("gantt_chart.html").exists());
}

#[test]
fn bad_config_fails() {
    let dir = project_dir();
    fs::write(dir.path().join("milegantt.toml"), "unknown_key = 1\n").unwrap();

    let output = run_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("milegantt.toml"));
}

#[test]
fn skipping_everything_is_an_error() {
    let dir = project_dir();
    let output = run_in(dir.path(), &["--no-xlsx", "--no-html"]);
    assert_eq!(output.status.code(), Some(1));
}
