use std::io;
use std::os::unix::io::RawFd;

/// Returns true if `fd` refers to a terminal.
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Saved terminal attributes plus the cbreak switch applied on top of them.
///
/// Cbreak clears `ICANON` and `ECHO` but leaves `ISIG` alone, so Ctrl-C still
/// raises SIGINT for the process instead of arriving as a byte.
pub struct CbreakMode {
    fd: RawFd,
    saved: libc::termios,
    active: bool,
}

impl CbreakMode {
    /// Save the current attributes of `fd` and enter cbreak mode.
    pub fn enter(fd: RawFd) -> io::Result<Self> {
        if !is_tty(fd) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "file descriptor is not a tty",
            ));
        }

        let saved = get_attrs(fd)?;
        let mut raw = saved;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        set_attrs(fd, libc::TCSAFLUSH, &raw)?;

        Ok(Self {
            fd,
            saved,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Put the saved attributes back. Calling this more than once is a no-op.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        // Drain pending output first so the last status line is not cut off.
        set_attrs(self.fd, libc::TCSADRAIN, &self.saved)?;
        self.active = false;
        Ok(())
    }
}

impl Drop for CbreakMode {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn get_attrs(fd: RawFd) -> io::Result<libc::termios> {
    unsafe {
        let mut attrs: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut attrs) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(attrs)
    }
}

fn set_attrs(fd: RawFd, action: libc::c_int, attrs: &libc::termios) -> io::Result<()> {
    loop {
        let ret = unsafe { libc::tcsetattr(fd, action, attrs) };
        if ret == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
