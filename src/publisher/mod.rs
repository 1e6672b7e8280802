//! Outbound joint-command transports.
//!
//! The control loop only sees [`JointPublisher`]: hand it the joint names,
//! their positions and a timestamp, and give it a slice of time each
//! iteration to service its own I/O.

mod jsonl;
mod log;
mod message;
mod udp;

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime};

use thiserror::Error;

use crate::config::{PublisherConfig, PublisherKind};

pub use jsonl::JsonLinesPublisher;
pub use log::LogPublisher;
pub use message::{Envelope, Header, JointCommand, Stamp};
pub use udp::UdpPublisher;

/// Errors raised by a transport.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to open '{target}': {source}")]
    Open {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("{0} publisher is not configured")]
    NotConfigured(&'static str),
}

/// Delivers joint commands to whatever consumes them.
pub trait JointPublisher {
    /// Emit one message carrying `names` and `positions` stamped at `stamp`.
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError>;

    /// Service pending transport work for at most `timeout`.
    ///
    /// Transports without background work just wait out the timeout so the
    /// loop keeps its cadence.
    fn spin_once(&mut self, timeout: Duration) -> Result<(), PublishError> {
        if !timeout.is_zero() {
            thread::sleep(timeout);
        }
        Ok(())
    }
}

impl<P: JointPublisher + ?Sized> JointPublisher for Box<P> {
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError> {
        (**self).publish(names, positions, stamp)
    }

    fn spin_once(&mut self, timeout: Duration) -> Result<(), PublishError> {
        (**self).spin_once(timeout)
    }
}

/// Build the transport selected by `config`.
///
/// The log transport prints to stderr.
pub fn from_config(config: &PublisherConfig) -> Result<Box<dyn JointPublisher>, PublishError> {
    build(config, io::stderr())
}

fn build<W: Write + 'static>(
    config: &PublisherConfig,
    log_out: W,
) -> Result<Box<dyn JointPublisher>, PublishError> {
    let publisher: Box<dyn JointPublisher> = match config.kind {
        PublisherKind::Log => Box::new(LogPublisher::new(log_out, &config.topic, &config.frame_id)),
        PublisherKind::Jsonl => {
            let path = config.path.as_deref().ok_or(PublishError::NotConfigured("jsonl"))?;
            Box::new(JsonLinesPublisher::create(path, &config.topic, &config.frame_id)?)
        }
        PublisherKind::Udp => {
            let target = config
                .target
                .as_deref()
                .ok_or(PublishError::NotConfigured("udp"))?;
            Box::new(UdpPublisher::connect(target, &config.topic, &config.frame_id)?)
        }
    };
    tracing::info!(kind = ?config.kind, topic = %config.topic, "publisher ready");
    Ok(publisher)
}
