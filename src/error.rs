//! Error types for institute records.

use thiserror::Error;

use crate::event::{ErrorCategory, ErrorEvent};

/// Failure of a validated student operation.
///
/// Operations never return this to their caller. It is converted into an
/// [`ErrorEvent`] and published on the student's channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Blank text, mark outside 2..=5 or non-positive amount
    #[error("{operation}: invalid argument: {message}")]
    InvalidArgument { operation: String, message: String },

    /// Withdrawal exceeds the balance
    #[error("{operation}: insufficient funds: {message}")]
    InsufficientFunds { operation: String, message: String },

    /// Mark data could not be evaluated
    #[error("{operation}: evaluation failed: {message}")]
    EvaluationError { operation: String, message: String },
}

impl OperationError {
    pub fn invalid_argument(operation: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn insufficient_funds(operation: &str, message: impl Into<String>) -> Self {
        Self::InsufficientFunds {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn evaluation(operation: &str, message: impl Into<String>) -> Self {
        Self::EvaluationError {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
            Self::InsufficientFunds { .. } => ErrorCategory::InsufficientFunds,
            Self::EvaluationError { .. } => ErrorCategory::EvaluationError,
        }
    }

    /// The operation code, e.g. `"WithdrawError"`.
    pub fn operation(&self) -> &str {
        match self {
            Self::InvalidArgument { operation, .. }
            | Self::InsufficientFunds { operation, .. }
            | Self::EvaluationError { operation, .. } => operation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument { message, .. }
            | Self::InsufficientFunds { message, .. }
            | Self::EvaluationError { message, .. } => message,
        }
    }

    /// Convert into the event shape shared by every fault origin.
    pub fn into_event(self) -> ErrorEvent {
        let category = self.category();
        match self {
            Self::InvalidArgument { operation, message }
            | Self::InsufficientFunds { operation, message }
            | Self::EvaluationError { operation, message } => {
                ErrorEvent::new(category, operation, message)
            }
        }
    }
}

/// Errors raised while building or reorganising the entity tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordsError {
    /// A required name was empty or whitespace
    #[error("Name must not be empty: {0}")]
    EmptyName(&'static str),

    /// Course number outside 1..=6
    #[error("Course number must be between 1 and 6, got {0}")]
    InvalidCourseNumber(u8),

    /// Group name already used in the course (case-insensitive)
    #[error("Group already exists: {0}")]
    DuplicateGroup(String),

    /// Institute name already registered
    #[error("Institute already registered: {0}")]
    DuplicateInstitute(String),

    /// No institute with the given name
    #[error("Institute not found: {0}")]
    InstituteNotFound(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The id counter cannot advance any further
    #[error("Student identifiers exhausted")]
    IdsExhausted,
}

/// Result type alias for operation-layer validation.
pub type OperationResult<T> = Result<T, OperationError>;

/// Result type alias for entity-tree management.
pub type RecordsResult<T> = Result<T, RecordsError>;
