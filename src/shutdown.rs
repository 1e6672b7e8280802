use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::SigId;

/// Owns the interrupt flag and the OS signal registrations feeding it.
pub struct ShutdownCoordinator {
    interrupted: Arc<AtomicBool>,
    registrations: Vec<SigId>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            registrations: Vec::new(),
        }
    }

    /// Route SIGINT and SIGTERM into the interrupt flag.
    ///
    /// The handlers only store a flag; the control loop notices it on its
    /// next iteration and runs the normal teardown.
    pub fn register_signals(&mut self) -> io::Result<()> {
        for signal in [SIGINT, SIGTERM] {
            let id = signal_hook::flag::register(signal, Arc::clone(&self.interrupted))?;
            self.registrations.push(id);
        }
        tracing::debug!("interrupt handlers registered");
        Ok(())
    }

    /// Create a handle for sharing
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            interrupted: Arc::clone(&self.interrupted),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShutdownCoordinator {
    fn drop(&mut self) {
        for id in self.registrations.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Lightweight handle for checking the interrupt flag
#[derive(Clone)]
pub struct ShutdownHandle {
    interrupted: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Raise the interrupt flag as a signal handler would.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_coordinator_is_not_interrupted() {
        let coordinator = ShutdownCoordinator::new();
        assert!(!coordinator.handle().is_interrupted());
    }

    #[test]
    fn interrupt_is_visible_through_every_handle() {
        let coordinator = ShutdownCoordinator::new();
        let a = coordinator.handle();
        let b = coordinator.handle();
        a.interrupt();
        assert!(b.is_interrupted());
        assert!(coordinator.handle().is_interrupted());
    }

    #[test]
    fn sigterm_sets_interrupt_flag() {
        let mut coordinator = ShutdownCoordinator::new();
        coordinator.register_signals().unwrap();
        let handle = coordinator.handle();

        signal_hook::low_level::raise(SIGTERM).unwrap();

        assert!(handle.is_interrupted());
    }
}
