use std::fs::File;
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, FromRawFd};
use std::time::Duration;

use crate::mode::is_tty;

/// Single-byte reader over the terminal on stdin.
///
/// Uses `std::fs::File` for I/O and `select()` for readiness polling
/// (more reliable than `poll()` on macOS).
pub struct TtyReader {
    file: File,
}

impl TtyReader {
    /// Duplicate stdin if it is a terminal.
    ///
    /// There is no `/dev/tty` fallback: keys must come from the same stream
    /// whose mode was switched, so a redirected stdin is an error.
    pub fn open() -> io::Result<Self> {
        if !is_tty(libc::STDIN_FILENO) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "stdin is not a tty"));
        }
        let fd = unsafe { libc::dup(libc::STDIN_FILENO) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // Set close-on-exec to prevent leaking fd to child processes
        unsafe {
            libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC);
        }
        Ok(Self {
            file: unsafe { File::from_raw_fd(fd) },
        })
    }

    /// Wrap an already-open descriptor. Used for pipes in tests.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Wait up to `timeout` for a byte and read exactly one.
    ///
    /// Returns `Ok(None)` when nothing arrived in time. A zero timeout is a
    /// pure readiness check.
    pub fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        if !self.select(timeout_ms)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        // std::io::Read retries on EINTR automatically
        let n = self.file.read(&mut byte)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "tty closed"));
        }
        Ok(Some(byte[0]))
    }

    /// Wait for data using `select()`.
    fn select(&self, timeout_ms: i32) -> io::Result<bool> {
        let fd = self.file.as_raw_fd();
        unsafe {
            let mut read_fds: libc::fd_set = std::mem::zeroed();
            libc::FD_ZERO(&mut read_fds);
            libc::FD_SET(fd, &mut read_fds);

            let mut tv = libc::timeval {
                tv_sec: (timeout_ms / 1000) as libc::time_t,
                tv_usec: ((timeout_ms % 1000) * 1000) as libc::suseconds_t,
            };

            loop {
                let ret = libc::select(
                    fd + 1,
                    &mut read_fds,
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                    &mut tv,
                );
                if ret < 0 {
                    let err = io::Error::last_os_error();
                    if err.kind() == io::ErrorKind::Interrupted {
                        // EINTR: re-init fd_set (select may have clobbered it)
                        libc::FD_ZERO(&mut read_fds);
                        libc::FD_SET(fd, &mut read_fds);
                        continue;
                    }
                    return Err(err);
                }
                return Ok(ret > 0);
            }
        }
    }
}
