//! The locked, level-filtered write path.

use crate::error::{LogError, Result};
use crate::handle::Handle;
use crate::severity::Severity;
use std::fmt;
use std::io::{self, Write};

impl Handle {
    /// Writes one `"<name>: <message>\n"` line and returns the number of
    /// bytes written.
    ///
    /// Messages less urgent than the threshold are dropped without taking
    /// the lock and report 0 bytes. Otherwise the prefix, the formatted
    /// message and the newline are written while the lock is held, so the
    /// line is never interleaved with another thread's. The byte count
    /// saturates at `usize::MAX` instead of wrapping.
    ///
    /// Most callers go through [`log_write!`](crate::log_write).
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Poisoned`] if a previous writer panicked while
    /// holding the lock, and [`LogError::Write`] with the first failing
    /// write's error otherwise. The lock is released on every path.
    pub fn write_args(&self, severity: &Severity, args: fmt::Arguments<'_>) -> Result<usize> {
        if !self.enabled(severity) {
            return Ok(0);
        }

        let mut stream = self.stream.lock().map_err(|_| LogError::Poisoned)?;
        emit_line(&mut *stream, severity, args)
    }

    /// Writes an already formatted message.
    ///
    /// # Errors
    ///
    /// See [`Handle::write_args`].
    pub fn write_str(&self, severity: &Severity, message: &str) -> Result<usize> {
        self.write_args(severity, format_args!("{message}"))
    }
}

/// Emits prefix, message and newline in order, stopping at the first error.
fn emit_line<W: Write + ?Sized>(
    out: &mut W,
    severity: &Severity,
    args: fmt::Arguments<'_>,
) -> Result<usize> {
    let mut total = ByteTally::default();
    total.add(write_counted(
        out,
        format_args!("{}: ", severity.display_name()),
    )?);
    total.add(write_counted(out, args)?);
    total.add(write_counted(out, format_args!("\n"))?);
    Ok(total.get())
}

fn write_counted<W: Write + ?Sized>(out: &mut W, args: fmt::Arguments<'_>) -> Result<usize> {
    let mut counting = Counting {
        inner: out,
        written: 0,
    };
    counting
        .write_fmt(args)
        .map_err(|source| LogError::Write { source })?;
    Ok(counting.written)
}

/// Running byte total that sticks at `usize::MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ByteTally(usize);

impl ByteTally {
    fn add(&mut self, bytes: usize) {
        self.0 = self.0.saturating_add(bytes);
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// Forwards writes and counts the bytes the inner writer accepted.
struct Counting<'a, W: ?Sized> {
    inner: &'a mut W,
    written: usize,
}

impl<W: Write + ?Sized> Write for Counting<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written = self.written.saturating_add(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
