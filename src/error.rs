//! The error type for `datespan_rs`.

use alloc::borrow::Cow;
use core::fmt;

/// The kind of error that occurred.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A date, time, or offset component was out of range, or an instant
    /// fell outside the representable range.
    #[default]
    InvalidDate,
    /// A duration subtraction would have produced a negative duration.
    NegativeDuration,
    /// A string could not be parsed as an ISO 8601 value.
    Syntax,
    /// An internal invariant was violated.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidDate => "InvalidDate",
            Self::NegativeDuration => "NegativeDuration",
            Self::Syntax => "Syntax",
            Self::Assert => "Assert",
        })
    }
}

/// The error returned by fallible `datespan_rs` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpanError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateSpanError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates an invalid-date error.
    #[inline]
    #[must_use]
    pub const fn invalid_date() -> Self {
        Self::new(ErrorKind::InvalidDate)
    }

    /// Creates a negative-duration error.
    #[inline]
    #[must_use]
    pub const fn negative_duration() -> Self {
        Self::new(ErrorKind::NegativeDuration)
    }

    /// Creates a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error for a violated internal invariant.
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to this error.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.msg = message.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this error's message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for DateSpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for DateSpanError {}
