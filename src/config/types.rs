use serde::{Deserialize, Serialize};

use crate::control::{DEFAULT_POLL_TIMEOUT, DEFAULT_SPIN_TIMEOUT};
use crate::joints::DEFAULT_JOINT_NAMES;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub joints: JointsConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub publisher: PublisherConfig,
}

/// Joint layout and adjustment granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointsConfig {
    /// Joint names in publication order. Digit keys select them 1-based.
    #[serde(default = "default_joint_names")]
    pub names: Vec<String>,
    /// Starting target positions. All zero when omitted.
    #[serde(default)]
    pub initial_positions: Option<Vec<f64>>,
    /// Position change per `a`/`d` keystroke (default: 0.01).
    #[serde(default = "default_step_size")]
    pub step_size: f64,
}

/// Control loop cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long a keyboard poll may wait (default: 0, pure poll).
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    /// How long the publisher is serviced per iteration (default: 10).
    #[serde(default = "default_spin_timeout_ms")]
    pub spin_timeout_ms: u64,
}

/// Keyboard input handling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Read keys on a dedicated thread and hand them over a channel.
    #[serde(default)]
    pub threaded: bool,
}

/// Outbound transport selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherKind {
    /// Structured log event only (dry run).
    #[default]
    Log,
    /// One JSON object per line, appended to `path`.
    Jsonl,
    /// One JSON datagram per message, sent to `target`.
    Udp,
}

impl std::str::FromStr for PublisherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(PublisherKind::Log),
            "jsonl" => Ok(PublisherKind::Jsonl),
            "udp" => Ok(PublisherKind::Udp),
            other => Err(format!(
                "unknown publisher '{}' (expected log, jsonl or udp)",
                other
            )),
        }
    }
}

/// Outbound message settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherConfig {
    #[serde(default)]
    pub kind: PublisherKind,
    /// Topic the messages are addressed to (default: "/joint_command").
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Header frame id (default: empty).
    #[serde(default)]
    pub frame_id: String,
    /// Destination `host:port` for the `udp` transport.
    #[serde(default)]
    pub target: Option<String>,
    /// Output file for the `jsonl` transport.
    #[serde(default)]
    pub path: Option<std::path::PathBuf>,
}

fn default_joint_names() -> Vec<String> {
    DEFAULT_JOINT_NAMES.iter().map(|n| n.to_string()).collect()
}

fn default_step_size() -> f64 {
    0.01
}

fn default_poll_timeout_ms() -> u64 {
    DEFAULT_POLL_TIMEOUT.as_millis() as u64
}

fn default_spin_timeout_ms() -> u64 {
    DEFAULT_SPIN_TIMEOUT.as_millis() as u64
}

fn default_topic() -> String {
    "/joint_command".to_string()
}

impl Default for JointsConfig {
    fn default() -> Self {
        Self {
            names: default_joint_names(),
            initial_positions: None,
            step_size: default_step_size(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            spin_timeout_ms: default_spin_timeout_ms(),
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::Log,
            topic: default_topic(),
            frame_id: String::new(),
            target: None,
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            joints: JointsConfig::default(),
            timing: TimingConfig::default(),
            input: InputConfig::default(),
            publisher: PublisherConfig::default(),
        }
    }
}
