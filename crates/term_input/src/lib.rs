//! Raw keyboard access for the controlling terminal.
//!
//! [`CbreakMode`] switches a terminal into non-canonical, non-echoing mode
//! and restores the saved attributes on release. [`TtyReader`] polls it for
//! single bytes without blocking past a caller-supplied timeout.

mod mode;
mod reader;

pub use mode::{is_tty, CbreakMode};
pub use reader::TtyReader;
