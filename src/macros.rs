//! Logging macros for message templates with arguments.
//!
//! Each severity macro has two forms:
//!
//! - `info!(logger, "fmt", args..)` logs through the given [`Logger`](crate::Logger)
//! - `info!("fmt", args..)` logs through the process-wide logger in
//!   [`global`](crate::global)
//!
//! Every form evaluates to the `Result<()>` of the emission. Arguments are
//! only formatted when the message passes the level floor.
//!
//! # Examples
//!
//! ```
//! use batch_logger::prelude::*;
//! use batch_logger::{information, warning};
//!
//! let logger = Logger::builder().sink_fn("discard", |_| Ok(())).build()?;
//!
//! information!(logger, "Server started")?;
//!
//! let port = 8080;
//! information!(logger, "Server listening on port {}", port)?;
//! warning!(logger, "Retry attempt {} of {}", 3, 5)?;
//! # Ok::<(), batch_logger::LoggerError>(())
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use batch_logger::prelude::*;
/// # let logger = Logger::builder().sink_fn("discard", |_| Ok(())).build().unwrap();
/// use batch_logger::log;
/// log!(logger, Severity::Information, "Simple message").unwrap();
/// log!(logger, Severity::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+))
    };
}

/// Log a fatal message. Fatal messages are never filtered.
///
/// ```
/// # use batch_logger::prelude::*;
/// # let logger = Logger::builder().sink_fn("discard", |_| Ok(())).build().unwrap();
/// use batch_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Fatal, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Error, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Warning, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an information message.
#[macro_export]
macro_rules! information {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Information, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Information, $($arg)+)
    };
}

/// Log a debug message.
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Debug, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log a verbose message.
#[macro_export]
macro_rules! verbose {
    ($fmt:literal $($arg:tt)*) => {
        $crate::global::log_fmt($crate::Severity::Verbose, format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Verbose, $($arg)+)
    };
}
