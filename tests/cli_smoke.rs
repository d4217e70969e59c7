use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    assert!(Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_as(dir: &Path, author: &str, date: &str, message: &str) {
    assert!(Command::new("git")
        .args(["commit", "--allow-empty", "--quiet", "-m", message])
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", "dev@example.com")
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", "dev@example.com")
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn sample_repo(dir: &Path) {
    init_git_repo(dir);
    commit_as(dir, "Ana", "2024-05-06T09:00:00+00:00", "AB-1 scaffold");
    commit_as(dir, "Ana", "2024-05-06T10:30:00+00:00", "AB-1 tests, CD-22");
    commit_as(dir, "Ana", "2024-05-06T14:00:00+00:00", "polish");
    commit_as(dir, "Ben", "2024-05-07T11:00:00+00:00", "AB-1 review fixes");
}

fn run_json(cwd: &Path, args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("devhours").unwrap();
    cmd.current_dir(cwd).args(args).args(["--output", "json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn summary_json_for_single_repository() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("shop");
    sample_repo(&repo);

    let v = run_json(dir.path(), &[repo.to_str().unwrap()]);
    assert_eq!(v["report_type"], "summary");
    let summary = &v["repositories"]["shop"]["summary"];
    assert_eq!(summary["total_developers"], 2);
    assert_eq!(summary["total_hours"], 2.5);
    assert_eq!(summary["total_tasks"], 2);
}

#[test]
fn detailed_json_reports_sessions_per_author() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("shop");
    sample_repo(&repo);

    let v = run_json(dir.path(), &[repo.to_str().unwrap(), "-t", "detailed"]);
    let ana = &v["repositories"]["shop"]["detailed"]["Ana"];
    assert_eq!(ana["hours"], 2.0);
    assert_eq!(ana["sessions"], 2);
    assert_eq!(ana["task_count"], 2);
    assert_eq!(ana["p90_session"], "N/A");
    assert_eq!(v["repositories"]["shop"]["detailed"]["Ben"]["hours"], 0.5);
}

#[test]
fn directory_scan_skips_non_repositories_and_excluded_authors() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("work");
    sample_repo(&root.join("shop"));
    fs::create_dir_all(root.join("notes")).unwrap();
    fs::write(dir.path().join("externals.txt"), "ben\n").unwrap();

    let v = run_json(dir.path(), &[root.to_str().unwrap(), "-t", "tasks"]);
    let repos = v["repositories"].as_object().unwrap();
    assert_eq!(repos.len(), 1);

    let tasks = &repos["shop"]["tasks"];
    assert_eq!(tasks["AB-1"]["hours"], 2.0);
    assert_eq!(tasks["AB-1"]["developers"], serde_json::json!(["Ana"]));
    assert_eq!(tasks["CD-22"]["hours"], 2.0);
}

#[test]
fn non_repository_directories_are_skipped_quietly() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("work");
    sample_repo(&root.join("shop"));
    fs::create_dir_all(root.join("notes")).unwrap();

    let mut cmd = Command::cargo_bin("devhours").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg(&root)
        .args(["--output", "json"]);
    let out = cmd.assert().success().get_output().clone();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("notes"), "unexpected stderr: {stderr}");

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["repositories"].as_object().unwrap().len(), 1);
}

#[test]
fn date_window_limits_commits() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("shop");
    sample_repo(&repo);

    let v = run_json(
        dir.path(),
        &[repo.to_str().unwrap(), "--since", "2024-05-07", "--until", "2024-05-07"],
    );
    let summary = &v["repositories"]["shop"]["summary"];
    assert_eq!(summary["total_developers"], 1);
    assert_eq!(summary["total_hours"], 0.5);
}

#[test]
fn csv_output_writes_requested_file() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("shop");
    sample_repo(&repo);
    let csv = dir.path().join("out.csv");

    let mut cmd = Command::cargo_bin("devhours").unwrap();
    cmd.current_dir(dir.path())
        .arg(&repo)
        .args(["-o", "csv", "--csv-file"])
        .arg(&csv);
    cmd.assert().success();

    let contents = fs::read_to_string(&csv).unwrap();
    let mut lines = contents.trim_start_matches('\u{feff}').lines();
    assert_eq!(lines.next(), Some("Repository,Developers,Total Hours,Unique Tasks"));
    assert_eq!(lines.next(), Some("shop,2,2.5,2"));
}

#[test]
fn nothing_to_report_is_not_an_error() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    let mut cmd = Command::cargo_bin("devhours").unwrap();
    cmd.current_dir(dir.path()).arg(dir.path());
    let out = cmd.assert().success().get_output().stdout.clone();
    assert!(String::from_utf8_lossy(&out).contains("No valid repositories"));
}

#[test]
fn malformed_task_pattern_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("devhours").unwrap();
    cmd.current_dir(dir.path())
        .arg(dir.path())
        .args(["--task-pattern", "(AB-"]);
    cmd.assert().failure();
}
