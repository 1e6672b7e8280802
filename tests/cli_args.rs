//! Tests for CLI argument parsing and startup failures, run against the
//! actual binary.

use std::process::Command;

use tempfile::TempDir;

/// Binary with an empty config dir and stdin detached from any terminal.
fn teleop_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_joint-teleop"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("JOINT_TELEOP_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    let home = TempDir::new().unwrap();
    let output = teleop_cmd(&home)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--step-size"));
    assert!(stdout.contains("--publisher"));
    assert!(stdout.contains("--threaded-input"));
}

#[test]
fn test_redirected_stdin_is_terminal_unavailable() {
    let home = TempDir::new().unwrap();
    let output = teleop_cmd(&home)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Terminal unavailable"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_invalid_step_size_is_rejected_before_terminal_setup() {
    let home = TempDir::new().unwrap();
    let output = teleop_cmd(&home)
        .arg("--step-size=-1")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("step_size must be a positive number"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");
    let output = teleop_cmd(&home)
        .arg("--config")
        .arg(&missing)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_udp_without_target_is_rejected() {
    let home = TempDir::new().unwrap();
    let output = teleop_cmd(&home)
        .args(["--publisher", "udp"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("udp publisher requires a target address"));
}
