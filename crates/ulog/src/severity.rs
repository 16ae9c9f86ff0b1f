//! Severity levels used both as message urgency and as handle thresholds.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text written in place of a severity that carries no name.
pub const NULL_NAME: &str = "(null)";

/// A `{rank, name}` pair describing how urgent a message is.
///
/// Lower ranks are more urgent. A handle configured with threshold `t`
/// emits a message of severity `s` when `s.rank() <= t.rank()`, so ties
/// are emitted and anything ranked above the threshold is dropped.
///
/// The crate defines no closed set of levels: the associated constants are
/// a conventional ladder, and callers are free to build their own.
///
/// # Example
///
/// ```rust
/// use ulog::Severity;
///
/// let notice = Severity::new(3, "NOTICE");
/// assert!(Severity::WARN.admits(&Severity::ERROR));
/// assert!(!Severity::WARN.admits(&notice));
/// assert_eq!(Severity::unnamed(7).display_name(), "(null)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Severity {
    rank: i32,
    name: Option<Cow<'static, str>>,
}

impl Severity {
    /// Unrecoverable failures.
    pub const FATAL: Self = Self::new(0, "FATAL");
    /// Failures of the current operation.
    pub const ERROR: Self = Self::new(1, "ERROR");
    /// Conditions worth attention that do not stop progress.
    pub const WARN: Self = Self::new(2, "WARN");
    /// Coarse-grained progress.
    pub const INFO: Self = Self::new(3, "INFO");
    /// Fine-grained diagnostics.
    pub const DEBUG: Self = Self::new(4, "DEBUG");
    /// Very fine-grained tracing.
    pub const TRACE: Self = Self::new(5, "TRACE");

    /// Creates a severity with a static display name.
    #[must_use]
    pub const fn new(rank: i32, name: &'static str) -> Self {
        Self {
            rank,
            name: Some(Cow::Borrowed(name)),
        }
    }

    /// Creates a severity without a display name; its lines are prefixed
    /// with [`NULL_NAME`].
    #[must_use]
    pub const fn unnamed(rank: i32) -> Self {
        Self { rank, name: None }
    }

    /// Creates a severity whose name is only known at runtime.
    #[must_use]
    pub fn named(rank: i32, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            rank,
            name: Some(name.into()),
        }
    }

    /// Returns the numeric rank.
    #[must_use]
    pub const fn rank(&self) -> i32 {
        self.rank
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the text used as the line prefix.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(NULL_NAME)
    }

    /// Reports whether a message at `message` passes this severity used as
    /// a threshold.
    #[must_use]
    pub const fn admits(&self, message: &Self) -> bool {
        message.rank <= self.rank
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(Self::FATAL),
            "error" => Ok(Self::ERROR),
            "warn" => Ok(Self::WARN),
            "info" => Ok(Self::INFO),
            "debug" => Ok(Self::DEBUG),
            "trace" => Ok(Self::TRACE),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Error returned when parsing a name that is not one of the conventional
/// severities.
///
/// Accepted names, case-insensitively: `"fatal"`, `"error"`, `"warn"`,
/// `"info"`, `"debug"`, `"trace"`.
///
/// ```rust
/// use ulog::Severity;
///
/// assert!("WARN".parse::<Severity>().is_ok());
/// assert!("warning".parse::<Severity>().is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid severity: {0:?}")]
pub struct ParseSeverityError(String);

/// A specialized [`Result`] type for severity parsing.
pub type ParseResult<T> = std::result::Result<T, ParseSeverityError>;
