//! Error type shared by every handle operation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by [`Handle`](crate::Handle) operations.
///
/// Variants that wrap an [`io::Error`] preserve the operating system's error
/// code; use [`LogError::raw_os_error`] to recover it.
#[derive(Error, Debug)]
pub enum LogError {
    /// Duplicating the caller's descriptor failed.
    #[error("failed to duplicate log descriptor: {source}")]
    Duplicate {
        #[source]
        source: io::Error,
    },

    /// Switching the duplicated descriptor to append mode failed.
    #[error("failed to configure log descriptor for append: {source}")]
    Configure {
        #[source]
        source: io::Error,
    },

    /// Opening the log file failed.
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A writer panicked while holding the handle's lock.
    #[error("log handle lock poisoned by a panicking writer")]
    Poisoned,

    /// Writing a log line (or flushing it) failed.
    #[error("failed to write log line: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    /// Flushing buffered output while closing the handle failed.
    #[error("failed to close log stream: {source}")]
    Close {
        #[source]
        source: io::Error,
    },
}

impl LogError {
    /// Returns the operating system error code behind this error, if any.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }

    /// Returns the underlying I/O error, if any.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Duplicate { source }
            | Self::Configure { source }
            | Self::Open { source, .. }
            | Self::Write { source }
            | Self::Close { source } => Some(source),
            Self::Poisoned => None,
        }
    }
}

/// A specialized [`Result`] type for handle operations.
pub type Result<T> = std::result::Result<T, LogError>;
