//! Log handle lifecycle: open, inspect, close.

use crate::error::{LogError, Result};
use crate::severity::Severity;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

#[cfg(unix)]
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};

/// An exclusively-owned, line-buffered log stream guarded by a lock.
///
/// Every write to the stream happens while the handle's mutex is held, so
/// lines written from different threads never interleave. The threshold is
/// fixed at construction and read without locking.
///
/// Share a handle between threads by reference or through an
/// [`Arc`](std::sync::Arc). [`Handle::close`] consumes the handle, which
/// makes closing twice or writing after close a compile-time error; a shared
/// handle must be unwrapped back to sole ownership before it can be closed.
///
/// Dropping a handle without closing it flushes and closes the stream but
/// discards any error from doing so.
pub struct Handle {
    pub(crate) stream: Mutex<LineWriter<File>>,
    pub(crate) threshold: Severity,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl Handle {
    /// Opens a handle over a duplicate of `stream`'s descriptor.
    ///
    /// The caller keeps full ownership of `stream`: closing it afterwards
    /// does not affect the handle, and closing the handle does not affect
    /// it. The duplicate is switched to append mode and line buffered.
    /// Append mode belongs to the open file description, so the caller's
    /// descriptor observes it too.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Duplicate`] if the descriptor cannot be
    /// duplicated and [`LogError::Configure`] if append mode cannot be set.
    /// The duplicate is closed before either error is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ulog::{Handle, Severity};
    ///
    /// let file = tempfile::tempfile()?;
    /// let log = Handle::open(&file, Severity::WARN)?;
    /// drop(file);
    /// log.write_str(&Severity::ERROR, "still writable")?;
    /// log.close()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[cfg(unix)]
    pub fn open<S: AsFd + ?Sized>(stream: &S, threshold: Severity) -> Result<Self> {
        Self::open_fd(stream.as_fd(), threshold)
    }

    /// Opens a handle over a duplicate of `fd`.
    ///
    /// Same contract as [`Handle::open`]; the caller's descriptor stays
    /// independently owned and closable.
    ///
    /// # Errors
    ///
    /// See [`Handle::open`].
    #[cfg(unix)]
    pub fn open_fd(fd: BorrowedFd<'_>, threshold: Severity) -> Result<Self> {
        let owned = fd
            .try_clone_to_owned()
            .map_err(|source| LogError::Duplicate { source })?;
        ensure_append(&owned)?;

        tracing::debug!(
            source_fd = fd.as_raw_fd(),
            fd = owned.as_raw_fd(),
            threshold = %threshold,
            "opened log handle on duplicated descriptor"
        );
        Ok(Self::from_file(File::from(owned), threshold))
    }

    /// Opens a handle on standard error.
    ///
    /// # Errors
    ///
    /// See [`Handle::open`].
    #[cfg(unix)]
    pub fn stderr(threshold: Severity) -> Result<Self> {
        Self::open(&std::io::stderr(), threshold)
    }

    /// Opens a handle on standard output.
    ///
    /// # Errors
    ///
    /// See [`Handle::open`].
    #[cfg(unix)]
    pub fn stdout(threshold: Severity) -> Result<Self> {
        Self::open(&std::io::stdout(), threshold)
    }

    /// Opens `path` for appending, creating it if it does not exist.
    ///
    /// The freshly opened file is owned by the handle directly.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] with the path and the underlying system
    /// error if the file cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P, threshold: Severity) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), threshold = %threshold, "opened log file");
        Ok(Self::from_file(file, threshold))
    }

    fn from_file(file: File, threshold: Severity) -> Self {
        Self {
            stream: Mutex::new(LineWriter::new(file)),
            threshold,
        }
    }

    /// Returns the threshold fixed at construction.
    #[must_use]
    pub const fn threshold(&self) -> &Severity {
        &self.threshold
    }

    /// Reports whether a message at `severity` would be written.
    #[must_use]
    pub const fn enabled(&self, severity: &Severity) -> bool {
        self.threshold.admits(severity)
    }

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Poisoned`] if a writer panicked while holding the
    /// lock and [`LogError::Write`] if the flush fails.
    pub fn flush(&self) -> Result<()> {
        let mut stream = self.stream.lock().map_err(|_| LogError::Poisoned)?;
        stream.flush().map_err(|source| LogError::Write { source })
    }

    /// Tears the handle down: releases the lock, then flushes and closes the
    /// stream.
    ///
    /// Both steps are always attempted and the stream is closed even when
    /// an error is reported. The first error encountered is returned.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Poisoned`] if a writer panicked while holding the
    /// lock, otherwise [`LogError::Close`] if buffered output could not be
    /// flushed.
    pub fn close(self) -> Result<()> {
        let Self { stream, threshold } = self;
        let mut first_error = None;

        let writer = stream.into_inner().unwrap_or_else(|poisoned| {
            first_error = Some(LogError::Poisoned);
            poisoned.into_inner()
        });

        // Unwrapping the line writer flushes it; dropping the file closes it.
        if let Err(err) = writer.into_inner().map(drop) {
            first_error.get_or_insert(LogError::Close {
                source: err.into_error(),
            });
        }

        match first_error {
            Some(err) => {
                tracing::warn!(error = %err, threshold = %threshold, "log handle closed with error");
                Err(err)
            }
            None => {
                tracing::debug!(threshold = %threshold, "log handle closed");
                Ok(())
            }
        }
    }
}

/// Puts the open file description behind `fd` into append mode.
#[cfg(unix)]
fn ensure_append(fd: &OwnedFd) -> Result<()> {
    use rustix::fs::{OFlags, fcntl_getfl, fcntl_setfl};

    let flags = fcntl_getfl(fd).map_err(|errno| LogError::Configure {
        source: errno.into(),
    })?;
    if !flags.contains(OFlags::APPEND) {
        fcntl_setfl(fd, flags | OFlags::APPEND).map_err(|errno| LogError::Configure {
            source: errno.into(),
        })?;
    }
    Ok(())
}

/// Options for opening handles.
///
/// # Example
///
/// ```rust
/// use ulog::{Options, Severity};
///
/// let dir = tempfile::tempdir()?;
/// let opts = Options { threshold: Severity::DEBUG };
/// let log = opts.open_path(dir.path().join("app.log"))?;
/// assert_eq!(log.threshold(), &Severity::DEBUG);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Least urgent severity that is still written.
    pub threshold: Severity,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: Severity::INFO,
        }
    }
}

impl Options {
    /// Opens a handle over a duplicate of `stream`'s descriptor.
    ///
    /// # Errors
    ///
    /// See [`Handle::open`].
    #[cfg(unix)]
    pub fn open<S: AsFd + ?Sized>(&self, stream: &S) -> Result<Handle> {
        Handle::open(stream, self.threshold.clone())
    }

    /// Opens a handle over a duplicate of `fd`.
    ///
    /// # Errors
    ///
    /// See [`Handle::open_fd`].
    #[cfg(unix)]
    pub fn open_fd(&self, fd: BorrowedFd<'_>) -> Result<Handle> {
        Handle::open_fd(fd, self.threshold.clone())
    }

    /// Opens `path` for appending.
    ///
    /// # Errors
    ///
    /// See [`Handle::open_path`].
    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<Handle> {
        Handle::open_path(path, self.threshold.clone())
    }
}
