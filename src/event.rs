//! Error events delivered through notification channels.
//!
//! Every fault reported by the crate, whether it comes from a rejected
//! student operation or from the fault demonstration, ends up in the same
//! [`ErrorEvent`] shape so subscribers need exactly one handler signature.

use std::fmt;

use chrono::{DateTime, Local};

/// Classification of a reported fault.
///
/// The string returned by [`ErrorCategory::as_str`] is part of the public
/// contract: consumers pattern-match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Blank text, out-of-range mark, non-positive amount.
    InvalidArgument,
    /// Withdrawal larger than the current balance.
    InsufficientFunds,
    /// Mark data that cannot be evaluated.
    EvaluationError,
    DivideByZero,
    IndexOutOfRange,
    ArrayTypeMismatch,
    InvalidCast,
    Overflow,
    /// Always simulated, never triggered for real.
    OutOfMemory,
    /// Always simulated, never triggered for real.
    StackOverflow,
}

impl ErrorCategory {
    /// Returns the public classification string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::EvaluationError => "EvaluationError",
            Self::DivideByZero => "DivideByZero",
            Self::IndexOutOfRange => "IndexOutOfRange",
            Self::ArrayTypeMismatch => "ArrayTypeMismatch",
            Self::InvalidCast => "InvalidCast",
            Self::Overflow => "Overflow",
            Self::OutOfMemory => "OutOfMemory",
            Self::StackOverflow => "StackOverflow",
        }
    }

    /// Returns `true` for categories that can only be simulated.
    pub fn is_simulated(&self) -> bool {
        matches!(self, Self::OutOfMemory | Self::StackOverflow)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported fault: `{kind, text, time}` plus its category.
///
/// `kind` names the failing operation (`"PutMarkError"`, `"WithdrawError"`)
/// or, for demonstrated faults, the fault class itself (`"DivideByZero"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    category: ErrorCategory,
    kind: String,
    text: String,
    time: DateTime<Local>,
}

impl ErrorEvent {
    /// Create an event stamped with the current local time.
    pub fn new(category: ErrorCategory, kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category,
            kind: kind.into(),
            text: text.into(),
            time: Local::now(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    /// Same event with a different detail text. The timestamp is kept.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}({}) | {}",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.category,
            self.kind,
            self.text
        )
    }
}
