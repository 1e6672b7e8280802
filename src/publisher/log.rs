use std::io::{self, Write};
use std::time::SystemTime;

use super::message::JointCommand;
use super::{JointPublisher, PublishError};

/// Prints each command as one readable line and mirrors it as a tracing event.
///
/// Lines look like `/joint_command #3 @1700000000.250000000 right_j0=0.03 head_pan=0`.
pub struct LogPublisher<W: Write> {
    out: W,
    topic: String,
    frame_id: String,
    published: u64,
}

impl<W: Write> LogPublisher<W> {
    pub fn new(out: W, topic: &str, frame_id: &str) -> Self {
        Self {
            out,
            topic: topic.to_string(),
            frame_id: frame_id.to_string(),
            published: 0,
        }
    }

    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_line(&mut self, command: &JointCommand) -> io::Result<()> {
        write!(
            self.out,
            "{} #{} @{}.{:09}",
            self.topic, self.published, command.header.stamp.sec, command.header.stamp.nanosec
        )?;
        for (name, position) in command.name.iter().zip(&command.position) {
            write!(self.out, " {}={}", name, position)?;
        }
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> JointPublisher for LogPublisher<W> {
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError> {
        let command = JointCommand::new(names, positions, stamp, &self.frame_id);
        self.published += 1;
        tracing::info!(
            target: "joint_teleop::publish",
            topic = %self.topic,
            seq = self.published,
            sec = command.header.stamp.sec,
            nanosec = command.header.stamp.nanosec,
            name = ?command.name,
            position = ?command.position,
            "joint command"
        );
        self.write_line(&command)?;
        Ok(())
    }
}
