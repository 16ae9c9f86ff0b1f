#![forbid(unsafe_code)]

//! # ulog
//!
//! Minimal thread-safe leveled logging for multi-threaded programs.
//!
//! A [`Handle`] owns an output stream, filters messages by [`Severity`], and
//! serializes writes behind a mutex so lines from different threads are
//! never interleaved or torn.
//!
//! - Handles opened from an existing stream or descriptor work on a
//!   duplicate, so the caller and the logger close their descriptors
//!   independently.
//! - Output is line buffered: every complete line reaches the stream before
//!   the write call returns.
//! - Every line has the fixed shape `"<name>: <message>\n"`.
//!
//! ## Example
//!
//! ```rust
//! use ulog::{Handle, Severity, log_write};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("app.log");
//!
//! let log = Handle::open_path(&path, Severity::WARN)?;
//! log_write!(log, Severity::ERROR, "disk {}", "failure")?;
//! log_write!(log, Severity::DEBUG, "tick")?; // below threshold, dropped
//! log.close()?;
//!
//! assert_eq!(std::fs::read_to_string(&path)?, "ERROR: disk failure\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Severity ordering
//!
//! Lower ranks are more urgent. A message is written when its rank is less
//! than or equal to the handle's threshold rank.

mod error;
mod handle;
mod severity;
mod write;

pub use error::{LogError, Result};
pub use handle::{Handle, Options};
pub use severity::{NULL_NAME, ParseResult, ParseSeverityError, Severity};

/// Writes a formatted line to a [`Handle`].
///
/// Expands to [`Handle::write_args`] with the arguments packaged by
/// [`format_args!`], and evaluates to its `Result<usize>`.
///
/// ```rust
/// use ulog::{Handle, Severity, log_write};
///
/// let file = tempfile::tempfile()?;
/// let log = Handle::open(&file, Severity::INFO)?;
/// let written = log_write!(log, Severity::INFO, "{} of {}", 3, 4)?;
/// assert_eq!(written, "INFO: 3 of 4\n".len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! log_write {
    ($handle:expr, $severity:expr, $($arg:tt)+) => {
        $handle.write_args(&$severity, ::std::format_args!($($arg)+))
    };
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Handle, LogError, NULL_NAME, Options, Severity, log_write};
}
