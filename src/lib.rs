//! Keyboard teleoperation of joint target positions.
//!
//! The operator picks a joint with a digit key and nudges it with `a`/`d`;
//! every position change is published as a joint command through a
//! [`publisher::JointPublisher`]. See [`control::ControlSession::run`] for
//! the loop itself.

pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod control;
pub mod error;
pub mod input;
pub mod joints;
pub mod logging;
pub mod publisher;
pub mod shutdown;
pub mod terminal;

pub use error::TeleopError;
