use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock time split into whole seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub sec: i64,
    pub nanosec: u32,
}

impl From<SystemTime> for Stamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Stamp {
                sec: since.as_secs() as i64,
                nanosec: since.subsec_nanos(),
            },
            // Pre-epoch clocks: keep nanosec in [0, 1e9) and borrow a second.
            Err(err) => {
                let before = err.duration();
                let mut sec = -(before.as_secs() as i64);
                let mut nanosec = 0;
                if before.subsec_nanos() > 0 {
                    sec -= 1;
                    nanosec = 1_000_000_000 - before.subsec_nanos();
                }
                Stamp { sec, nanosec }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Stamp,
    pub frame_id: String,
}

/// Joint-state shaped command: names and target positions in the same order.
///
/// `velocity` and `effort` are always empty; only positions are commanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointCommand {
    pub header: Header,
    pub name: Vec<String>,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub effort: Vec<f64>,
}

impl JointCommand {
    pub fn new(names: &[String], positions: &[f64], stamp: SystemTime, frame_id: &str) -> Self {
        Self {
            header: Header {
                stamp: stamp.into(),
                frame_id: frame_id.to_string(),
            },
            name: names.to_vec(),
            position: positions.to_vec(),
            velocity: Vec::new(),
            effort: Vec::new(),
        }
    }
}

/// Wire framing for transports that multiplex topics on one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub topic: String,
    pub msg: JointCommand,
}
