//! Session-level error taxonomy.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::publisher::PublishError;

/// Errors that end (or are reported by) a teleoperation session.
#[derive(Debug, Error)]
pub enum TeleopError {
    /// Raw mode could not be entered on stdin.
    #[error("Terminal unavailable: {source}")]
    TerminalUnavailable {
        #[source]
        source: io::Error,
    },

    /// Selection index outside the joint vector.
    #[error("Joint index {index} out of range (have {len} joints)")]
    OutOfRange { index: usize, len: usize },

    /// The outbound transport rejected a message.
    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    /// Operator interrupt (SIGINT/SIGTERM).
    #[error("Session interrupted")]
    Interrupted,

    /// Reading the keyboard failed mid-session.
    #[error("Keyboard input failed: {0}")]
    Input(#[source] io::Error),

    /// SIGINT/SIGTERM handlers could not be installed.
    #[error("Failed to install interrupt handlers: {0}")]
    Signals(#[source] io::Error),

    /// Writing to the operator console failed.
    #[error("Console output failed: {0}")]
    Console(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
