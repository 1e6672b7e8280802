use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime};

use super::message::{Envelope, JointCommand};
use super::{JointPublisher, PublishError};

/// Appends one JSON envelope per line to a writer.
///
/// Every publish flushes its line, so a failing sink is reported on the
/// command that hit it.
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
    topic: String,
    frame_id: String,
}

impl JsonLinesPublisher<BufWriter<File>> {
    /// Open (or create) `path` for appending.
    pub fn create(path: &Path, topic: &str, frame_id: &str) -> Result<Self, PublishError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| PublishError::Open {
                target: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(BufWriter::new(file), topic, frame_id))
    }
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W, topic: &str, frame_id: &str) -> Self {
        Self {
            writer,
            topic: topic.to_string(),
            frame_id: frame_id.to_string(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> JointPublisher for JsonLinesPublisher<W> {
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError> {
        let envelope = Envelope {
            topic: self.topic.clone(),
            msg: JointCommand::new(names, positions, stamp, &self.frame_id),
        };
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn spin_once(&mut self, timeout: Duration) -> Result<(), PublishError> {
        self.writer.flush()?;
        if !timeout.is_zero() {
            thread::sleep(timeout);
        }
        Ok(())
    }
}
