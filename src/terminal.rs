//! Scoped raw-mode ownership of the controlling terminal.

use std::sync::Arc;

use parking_lot::Mutex;
use term_input::CbreakMode;

use crate::error::TeleopError;

type Cleanup = Box<dyn FnOnce() + Send + 'static>;

/// Restores the terminal exactly once.
///
/// The restore action sits in a shared take-once slot reachable from
/// [`TerminalGuard::release`], `Drop` and the panic hook, so whichever exit
/// path runs first restores and every later one is a no-op.
pub struct TerminalGuard {
    cleanup: Arc<Mutex<Option<Cleanup>>>,
}

impl TerminalGuard {
    /// Guard an arbitrary restore action.
    pub fn with_cleanup<F: FnOnce() + Send + 'static>(cleanup: F) -> Self {
        Self {
            cleanup: Arc::new(Mutex::new(Some(Box::new(cleanup)))),
        }
    }

    /// Switch stdin to cbreak mode and guard the saved attributes.
    pub fn acquire() -> Result<Self, TeleopError> {
        let mode = CbreakMode::enter(libc::STDIN_FILENO)
            .map_err(|source| TeleopError::TerminalUnavailable { source })?;
        tracing::debug!("terminal switched to cbreak mode");

        let guard = Self::with_cleanup(move || {
            let mut mode = mode;
            match mode.restore() {
                Ok(()) => tracing::debug!("terminal settings restored"),
                Err(err) => tracing::warn!(error = %err, "failed to restore terminal settings"),
            }
        });
        guard.install_panic_hook();
        Ok(guard)
    }

    fn install_panic_hook(&self) {
        let cleanup = Arc::clone(&self.cleanup);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Some(cleanup) = cleanup.lock().take() {
                cleanup();
            }
            default_hook(info);
        }));
    }

    /// Run the restore action if nobody has yet.
    ///
    /// Returns true when this call performed the restore.
    pub fn release(&self) -> bool {
        // Take under the lock, run outside it.
        let cleanup = self.cleanup.lock().take();
        match cleanup {
            Some(cleanup) => {
                cleanup();
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.cleanup.lock().is_none()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}
