//! Shared test doubles for driving a control session without a terminal.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use joint_teleop::console::Console;
use joint_teleop::control::{Cadence, ControlSession};
use joint_teleop::input::KeySource;
use joint_teleop::joints::JointStore;
use joint_teleop::publisher::{JointPublisher, PublishError};
use joint_teleop::shutdown::ShutdownHandle;
use joint_teleop::terminal::TerminalGuard;

/// Cadence that never sleeps, so scripted sessions finish instantly.
pub const FAST: Cadence = Cadence {
    poll_timeout: Duration::ZERO,
    spin_timeout: Duration::ZERO,
};

/// Plays back a fixed key script.
///
/// Once the script is exhausted it either raises the interrupt flag (if a
/// handle was attached) or fails with `UnexpectedEof`, so a script missing
/// its `q` cannot hang a test.
pub struct ScriptedKeys {
    keys: VecDeque<char>,
    idle_between: usize,
    idle_left: usize,
    interrupt: Option<ShutdownHandle>,
    pub polls: usize,
}

impl ScriptedKeys {
    pub fn new(script: &str) -> Self {
        Self {
            keys: script.chars().collect(),
            idle_between: 0,
            idle_left: 0,
            interrupt: None,
            polls: 0,
        }
    }

    /// Report `n` empty polls before every key.
    pub fn with_idle_polls(mut self, n: usize) -> Self {
        self.idle_between = n;
        self.idle_left = n;
        self
    }

    pub fn then_interrupt(mut self, handle: ShutdownHandle) -> Self {
        self.interrupt = Some(handle);
        self
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<char>> {
        self.polls += 1;
        if self.idle_left > 0 {
            self.idle_left -= 1;
            return Ok(None);
        }
        self.idle_left = self.idle_between;
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => match &self.interrupt {
                Some(handle) => {
                    handle.interrupt();
                    Ok(None)
                }
                None => Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "key script exhausted",
                )),
            },
        }
    }
}

/// Records every published position vector.
#[derive(Default)]
pub struct RecordingPublisher {
    pub names: Vec<Vec<String>>,
    pub published: Vec<Vec<f64>>,
    pub stamps: Vec<SystemTime>,
    pub spins: usize,
    /// Zero-based publish attempts that should fail.
    pub fail_attempts: Vec<usize>,
    attempts: usize,
}

impl RecordingPublisher {
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_attempts: attempts.to_vec(),
            ..Self::default()
        }
    }
}

impl JointPublisher for RecordingPublisher {
    fn publish(
        &mut self,
        names: &[String],
        positions: &[f64],
        stamp: SystemTime,
    ) -> Result<(), PublishError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_attempts.contains(&attempt) {
            return Err(PublishError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "bus down",
            )));
        }
        self.names.push(names.to_vec());
        self.published.push(positions.to_vec());
        self.stamps.push(stamp);
        Ok(())
    }

    fn spin_once(&mut self, _timeout: Duration) -> Result<(), PublishError> {
        self.spins += 1;
        Ok(())
    }
}

/// Terminal guard whose restore action only counts invocations.
pub fn counting_guard() -> (TerminalGuard, Arc<AtomicUsize>) {
    let restores = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&restores);
    let guard = TerminalGuard::with_cleanup(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (guard, restores)
}

/// Session over the default 8-joint layout with step 0.01.
pub fn session() -> (ControlSession, Arc<AtomicUsize>) {
    let (guard, restores) = counting_guard();
    (
        ControlSession::new(JointStore::default(), 0.01, guard),
        restores,
    )
}

pub fn quiet_console() -> Console<Vec<u8>> {
    Console::new(Vec::new(), false)
}

pub fn console_text(console: &Console<Vec<u8>>) -> String {
    String::from_utf8(console.get_ref().clone()).expect("console output is utf-8")
}

pub fn restores(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
