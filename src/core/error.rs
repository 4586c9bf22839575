//! Error types for the logger system

use std::any::Any;
use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// A single sink that failed while receiving a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    /// Position of the sink in registration order
    pub index: usize,
    pub name: String,
    pub message: String,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink #{} ({}): {}", self.index, self.name, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Operation not allowed in the current logger state
    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation { operation: String, reason: String },

    /// Argument outside of the accepted domain
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// One or more sinks failed while the batch was fanned out
    #[error("{} sink(s) failed: {}", .failures.len(), join_failures(.failures))]
    SinkFailure { failures: Vec<SinkError> },

    /// The addendum producer panicked
    #[error("Addendum producer failed: {0}")]
    AddendumFailure(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

fn join_failures(failures: &[SinkError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an invalid operation error
    pub fn invalid_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::InvalidOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, LoggerError::InvalidOperation { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LoggerError::InvalidArgument { .. })
    }
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
