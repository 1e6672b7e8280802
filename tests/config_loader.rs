use std::fs;

use joint_teleop::config::{Config, ConfigError, PublisherKind, MAX_JOINTS};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

fn validation_message(result: Result<Config, ConfigError>) -> String {
    match result {
        Err(ConfigError::ValidationError { message }) => message,
        Err(other) => panic!("Expected ValidationError, got {}", other),
        Ok(_) => panic!("Expected ValidationError, got Ok"),
    }
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.joints.names.len(), 8);
    assert_eq!(config.joints.names[0], "right_j0");
    assert_eq!(config.joints.names[1], "head_pan");
    assert_eq!(config.joints.names[7], "right_j6");
    assert_eq!(config.joints.step_size, 0.01);
    assert!(config.joints.initial_positions.is_none());

    assert_eq!(config.timing.poll_timeout_ms, 0);
    assert_eq!(config.timing.spin_timeout_ms, 10);
    assert!(!config.input.threaded);

    assert_eq!(config.publisher.kind, PublisherKind::Log);
    assert_eq!(config.publisher.topic, "/joint_command");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("joint-teleop/config.toml"));
}

#[test]
fn test_empty_file_is_all_defaults() {
    let (_dir, path) = write_config("");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r#"
[joints]
names = ["shoulder", "elbow", "wrist"]
initial_positions = [0.0, 1.5, -0.25]
step_size = 0.05

[timing]
poll_timeout_ms = 2
spin_timeout_ms = 20

[input]
threaded = true

[publisher]
kind = "udp"
topic = "/arm/command"
frame_id = "base_link"
target = "127.0.0.1:7400"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.joints.names, vec!["shoulder", "elbow", "wrist"]);
    assert_eq!(config.joints.step_size, 0.05);
    assert_eq!(config.poll_timeout().as_millis(), 2);
    assert_eq!(config.spin_timeout().as_millis(), 20);
    assert!(config.input.threaded);
    assert_eq!(config.publisher.kind, PublisherKind::Udp);
    assert_eq!(config.publisher.frame_id, "base_link");

    let store = config.joint_store().unwrap();
    assert_eq!(store.positions(), &[0.0, 1.5, -0.25]);
    assert_eq!(store.cursor(), 0);
}

#[test]
fn test_missing_explicit_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = write_config("[joints\nnames = ");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unknown_publisher_kind_is_parse_error() {
    let (_dir, path) = write_config("[publisher]\nkind = \"carrier-pigeon\"\n");
    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_fails_empty_joints() {
    let (_dir, path) = write_config("[joints]\nnames = []\n");
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("at least one joint"));
}

#[test]
fn test_validation_fails_too_many_joints() {
    let names: Vec<String> = (0..=MAX_JOINTS).map(|i| format!("\"j{}\"", i)).collect();
    let (_dir, path) = write_config(&format!("[joints]\nnames = [{}]\n", names.join(", ")));
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("digit keys"));
}

#[test]
fn test_validation_fails_duplicate_names() {
    let (_dir, path) = write_config("[joints]\nnames = [\"a\", \"b\", \"a\"]\n");
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("duplicate joint name 'a'"));
}

#[test]
fn test_validation_fails_position_count_mismatch() {
    let (_dir, path) =
        write_config("[joints]\nnames = [\"a\", \"b\"]\ninitial_positions = [0.0]\n");
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("2 joint names but 1 initial positions"));
}

#[test]
fn test_validation_fails_non_positive_step() {
    for step in ["0.0", "-0.01", "nan", "inf"] {
        let (_dir, path) = write_config(&format!("[joints]\nstep_size = {}\n", step));
        let message = validation_message(Config::load_from(&path));
        assert!(message.contains("step_size"), "step {}: {}", step, message);
    }
}

#[test]
fn test_validation_requires_transport_destination() {
    let (_dir, path) = write_config("[publisher]\nkind = \"udp\"\n");
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("target"));

    let (_dir, path) = write_config("[publisher]\nkind = \"jsonl\"\n");
    let message = validation_message(Config::load_from(&path));
    assert!(message.contains("path"));
}
