use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::Builder;

fn rtam() -> Command {
    let mut cmd = Command::cargo_bin("rtam").unwrap();
    cmd.args(["--log-level", "error"]);
    cmd
}

#[test]
fn test_list_shows_autostarted_apps() {
    rtam()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("logger"))
        .stdout(predicate::str::contains("storage"))
        .stdout(predicate::str::contains("ui"))
        .stdout(predicate::str::contains("wifi").not());
}

#[test]
fn test_list_json() {
    let output = rtam().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let processes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = processes
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["ui", "storage", "logger"]);
}

#[test]
fn test_apps_lists_whole_image() {
    rtam()
        .arg("apps")
        .assert()
        .success()
        .stdout(predicate::str::contains("bluetooth"))
        .stdout(predicate::str::contains("stopped"))
        .stdout(predicate::str::contains("console"));
}

#[test]
fn test_launch_prints_ok() {
    rtam()
        .args(["launch", "wifi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launch wifi: ok"));
}

#[test]
fn test_launch_with_timeout() {
    rtam()
        .args(["launch", "bluetooth", "--timeout-ms", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launch bluetooth: ok"));
}

#[test]
fn test_launch_rejects_zero_timeout() {
    rtam()
        .args(["launch", "wifi", "--timeout-ms", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("launch wifi").not())
        .stderr(predicate::str::contains("invalid value '0'"));
}

#[test]
fn test_launch_unknown_fails() {
    rtam()
        .args(["launch", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("launch missing: fail"));
}

#[test]
fn test_launch_without_resume_hook_is_not_supported() {
    rtam()
        .args(["launch", "network"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("launch network: not supported"));
}

#[test]
fn test_async_start_reports_processing() {
    rtam()
        .args(["launch", "ota"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("launch ota: processing"));
}

#[test]
fn test_status_rejects_unknown_bits() {
    rtam()
        .args(["status", "logger", "running", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status bit"));
}

#[test]
fn test_shell_script() {
    rtam()
        .arg("shell")
        .write_stdin("launch wifi\nlaunch bluetooth\nterminate ui\nstatus logger resuming clear\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("launch wifi: ok"))
        .stdout(predicate::str::contains("launch bluetooth: ok"))
        .stdout(predicate::str::contains("terminate ui: ok"))
        .stdout(predicate::str::contains("status logger: ok"))
        .stdout(predicate::str::contains("bluetooth"));
}

#[test]
fn test_config_file_disables_autostart() {
    let file = Builder::new().suffix(".toml").tempfile().unwrap();
    fs::write(file.path(), "autostart = false\n").unwrap();

    rtam()
        .arg("--config")
        .arg(file.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("logger").not());
}
