//! Keyboard sources for the control loop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use term_input::TtyReader;

/// Keys buffered between the reader thread and the loop.
const KEY_BUFFER: usize = 64;
/// How often the reader thread re-checks its stop flag.
const PUMP_POLL: Duration = Duration::from_millis(50);

/// Something the control loop can poll for single keystrokes.
pub trait KeySource {
    /// Wait up to `timeout` for one key. `Ok(None)` means nothing arrived.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>>;
}

impl KeySource for TtyReader {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>> {
        Ok(self.read_byte(timeout)?.map(char::from))
    }
}

/// Reads the terminal on its own thread and hands keys over a bounded
/// single-producer/single-consumer channel, in arrival order.
///
/// A read error is forwarded once and ends the thread; the loop sees it on
/// its next poll.
pub struct KeyPump {
    rx: Option<Receiver<io::Result<u8>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl KeyPump {
    pub fn spawn(mut reader: TtyReader) -> io::Result<Self> {
        let (tx, rx) = mpsc::sync_channel(KEY_BUFFER);
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let thread = thread::Builder::new()
            .name("key-pump".to_string())
            .spawn(move || {
                while !thread_stop.load(Ordering::Relaxed) {
                    match reader.read_byte(PUMP_POLL) {
                        Ok(Some(byte)) => {
                            if tx.send(Ok(byte)).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "key pump read failed");
                            let _ = tx.send(Err(err));
                            break;
                        }
                    }
                }
                tracing::debug!("key pump stopped");
            })?;

        Ok(Self {
            rx: Some(rx),
            stop,
            thread: Some(thread),
        })
    }
}

impl KeySource for KeyPump {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<char>> {
        let Some(rx) = self.rx.as_ref() else {
            return Err(stopped());
        };
        let received = if timeout.is_zero() {
            rx.try_recv().map_err(|err| match err {
                TryRecvError::Empty => RecvTimeoutError::Timeout,
                TryRecvError::Disconnected => RecvTimeoutError::Disconnected,
            })
        } else {
            rx.recv_timeout(timeout)
        };
        match received {
            Ok(Ok(byte)) => Ok(Some(char::from(byte))),
            Ok(Err(err)) => Err(err),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(stopped()),
        }
    }
}

impl Drop for KeyPump {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // Dropping the receiver unblocks a sender waiting on a full buffer.
        self.rx.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn stopped() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "key reader stopped")
}
