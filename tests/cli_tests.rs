//! Integration tests for the check_haproxy_state binary.
//!
//! These run the built plugin the way a monitoring scheduler does and check
//! the exit code and the first stdout line.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use common::spawn_haproxy;

/// Helper to get the binary path
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_check_haproxy_state"))
}

fn run_plugin(args: &[&str]) -> Output {
    Command::new(binary_path())
        .arg("--no-syslog")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn first_stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn healthy_backends(dir: &Path) {
    spawn_haproxy(dir, "haproxy.sock", &[("web", "BACKEND", "UP")]);
}

#[test]
fn test_ok_exits_zero_with_status_line() {
    let dir = tempfile::tempdir().unwrap();
    healthy_backends(dir.path());
    let sockets = dir.path().to_str().unwrap();

    let output = run_plugin(&["--no-config", "-s", sockets, "-t", "backends"]);

    assert_eq!(output.status.code(), Some(0));
    let line = first_stdout_line(&output);
    assert!(line.starts_with("[INFO] ["), "got stdout line: '{}'", line);
    assert!(line.ends_with("] - OK: All 1 backends are in the right state"));
}

#[test]
fn test_status_line_printed_at_every_log_level() {
    let dir = tempfile::tempdir().unwrap();
    healthy_backends(dir.path());
    let sockets = dir.path().to_str().unwrap();

    for level in ["off", "error", "warn", "info", "debug"] {
        let output = run_plugin(&[
            "--no-config",
            "--log-level",
            level,
            "-s",
            sockets,
            "-t",
            "backends",
        ]);

        assert_eq!(output.status.code(), Some(0));
        let line = first_stdout_line(&output);
        assert!(
            line.ends_with("OK: All 1 backends are in the right state"),
            "level {}: got stdout '{}'",
            level,
            String::from_utf8_lossy(&output.stdout)
        );
        assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
    }
}

#[test]
fn test_error_status_printed_with_logging_off() {
    let dir = tempfile::tempdir().unwrap();
    spawn_haproxy(
        dir.path(),
        "haproxy.sock",
        &[("web1", "BACKEND", "UP"), ("web2", "BACKEND", "DOWN")],
    );
    let sockets = dir.path().to_str().unwrap();

    let output = run_plugin(&[
        "--no-config",
        "--log-level",
        "off",
        "-s",
        sockets,
        "-t",
        "backends",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let line = first_stdout_line(&output);
    assert!(line.starts_with("[ERROR] ["));
    assert!(line.ends_with(r#"Some backends have DOWN state: {"web2":"DOWN"}"#));
}

#[test]
fn test_unknown_exits_255() {
    let dir = tempfile::tempdir().unwrap();
    spawn_haproxy(dir.path(), "haproxy.sock", &[("http-in", "FRONTEND", "OPEN")]);
    let sockets = dir.path().to_str().unwrap();

    let output = run_plugin(&["--no-config", "-s", sockets, "-t", "backends"]);

    assert_eq!(output.status.code(), Some(255));
    assert!(first_stdout_line(&output).ends_with("No backends found"));
}

#[test]
fn test_missing_section_type_prints_usage_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let sockets = dir.path().to_str().unwrap();

    let output = run_plugin(&["--no-config", "-s", sockets]);

    assert_eq!(output.status.code(), Some(2));
    let line = first_stdout_line(&output);
    assert!(
        line.contains("There was a problem parsing the arguments passed to the script!"),
        "got stdout line: '{}'",
        line
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn test_missing_sockets_path_exits_2() {
    let output = run_plugin(&["--no-config", "-t", "frontends"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(first_stdout_line(&output).contains("There was a problem parsing the arguments"));
}

#[test]
fn test_invalid_section_type_never_touches_sockets() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    let output = run_plugin(&[
        "--no-config",
        "-s",
        missing.to_str().unwrap(),
        "-t",
        "servers",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let line = first_stdout_line(&output);
    assert!(line.contains("Bad value 'servers'"), "got stdout line: '{}'", line);
    assert!(!line.contains("Unable to connect"));
}

#[test]
fn test_unknown_flag_exits_2() {
    let output = run_plugin(&["--bogus"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(first_stdout_line(&output).contains("There was a problem parsing the arguments"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--bogus"));
}

#[test]
fn test_broken_config_reported_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let sockets = dir.path().join("sockets");
    fs::create_dir(&sockets).unwrap();
    healthy_backends(&sockets);
    let config = dir.path().join("haproxy-status.ini");
    fs::write(&config, "not an ini file\n").unwrap();

    let output = run_plugin(&[
        "-c",
        config.to_str().unwrap(),
        "-s",
        sockets.to_str().unwrap(),
        "-t",
        "backends",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(first_stdout_line(&output).ends_with("OK: All 1 backends are in the right state"));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Ignoring exclusion config"),
        "got stderr: '{}'",
        String::from_utf8_lossy(&output.stderr)
    );
}
