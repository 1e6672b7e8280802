//! The interactive control loop.

use std::io::Write;
use std::time::{Duration, SystemTime};

use crate::command::{interpret, Command};
use crate::config::Config;
use crate::console::Console;
use crate::error::TeleopError;
use crate::input::KeySource;
use crate::joints::JointStore;
use crate::publisher::JointPublisher;
use crate::shutdown::ShutdownHandle;
use crate::terminal::TerminalGuard;

/// Default keyboard wait per iteration: a pure readiness check.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::ZERO;
/// Default publisher service slice per iteration (~100 Hz loop).
pub const DEFAULT_SPIN_TIMEOUT: Duration = Duration::from_millis(10);

/// Per-iteration wait budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub poll_timeout: Duration,
    pub spin_timeout: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            spin_timeout: DEFAULT_SPIN_TIMEOUT,
        }
    }
}

impl From<&Config> for Cadence {
    fn from(config: &Config) -> Self {
        Self {
            poll_timeout: config.poll_timeout(),
            spin_timeout: config.spin_timeout(),
        }
    }
}

/// Joint state, step size and the terminal guard for one operator session.
///
/// Dropping the session restores the terminal if [`ControlSession::finish`]
/// was not called.
pub struct ControlSession {
    store: JointStore,
    step: f64,
    guard: TerminalGuard,
}

impl ControlSession {
    pub fn new(store: JointStore, step: f64, guard: TerminalGuard) -> Self {
        Self { store, step, guard }
    }

    pub fn store(&self) -> &JointStore {
        &self.store
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn is_terminal_restored(&self) -> bool {
        self.guard.is_released()
    }

    /// Run until `q` (`Ok`) or an interrupt (`Err(Interrupted)`).
    ///
    /// A keyboard error restores the terminal before it is returned. Publish
    /// failures are shown to the operator and the loop carries on; the local
    /// position stays changed.
    pub fn run<K, P, W>(
        &mut self,
        keys: &mut K,
        publisher: &mut P,
        console: &mut Console<W>,
        shutdown: &ShutdownHandle,
        cadence: Cadence,
    ) -> Result<(), TeleopError>
    where
        K: KeySource + ?Sized,
        P: JointPublisher + ?Sized,
        W: Write,
    {
        console
            .banner(&self.store, self.step)
            .map_err(TeleopError::Console)?;
        tracing::info!(
            joints = self.store.len(),
            step = self.step,
            ?cadence,
            "control loop started"
        );

        loop {
            if shutdown.is_interrupted() {
                tracing::info!("interrupt received, leaving control loop");
                console.farewell(true).map_err(TeleopError::Console)?;
                return Err(TeleopError::Interrupted);
            }

            let key = match keys.poll_key(cadence.poll_timeout) {
                Ok(key) => key,
                Err(err) => {
                    tracing::error!(error = %err, "keyboard poll failed");
                    self.guard.release();
                    return Err(TeleopError::Input(err));
                }
            };

            if let Some(key) = key {
                let command = Command::from_key(key, self.store.len());
                let transition = interpret(&mut self.store, command, self.step);
                tracing::debug!(?key, ?command, "key handled");
                console
                    .transition(&transition)
                    .map_err(TeleopError::Console)?;

                if transition.publishes() {
                    self.publish(publisher, console)?;
                }
                if transition.is_quit() {
                    console.farewell(false).map_err(TeleopError::Console)?;
                    return Ok(());
                }
            }

            if let Err(err) = publisher.spin_once(cadence.spin_timeout) {
                tracing::warn!(error = %err, "publisher spin failed");
            }
        }
    }

    /// Restore the terminal. Returns true if this call did the restore.
    pub fn finish(self) -> bool {
        self.guard.release()
    }

    fn publish<P, W>(&self, publisher: &mut P, console: &mut Console<W>) -> Result<(), TeleopError>
    where
        P: JointPublisher + ?Sized,
        W: Write,
    {
        let snapshot = self.store.snapshot();
        match publisher.publish(&snapshot.names, &snapshot.positions, SystemTime::now()) {
            Ok(()) => {
                tracing::trace!(positions = ?snapshot.positions, "joint command published");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "joint command publish failed");
                console.publish_failed(&err).map_err(TeleopError::Console)
            }
        }
    }
}
