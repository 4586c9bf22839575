//! Process-wide logger
//!
//! An opt-in slot for programs that configure logging once at start-up and
//! log from anywhere afterwards. The slot goes from uninitialized to
//! initialized exactly once and is never cleared; the installed logger and
//! its flush thread live for the rest of the process.
//!
//! ```no_run
//! use batch_logger::{global, Severity, LoggerBuilder};
//!
//! LoggerBuilder::new().min_level(Severity::Debug).init().unwrap();
//!
//! global::information("booted").unwrap();
//! batch_logger::debug!("free heap: {} bytes", 2048).unwrap();
//! ```

use crate::core::{Logger, LoggerBuilder, LoggerError, Result, Severity};
use std::fmt;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

fn already_initialized() -> LoggerError {
    LoggerError::invalid_operation("init", "the process-wide logger is already initialized")
}

/// Build `builder` and install it. Succeeds once per process.
pub fn install(builder: LoggerBuilder) -> Result<&'static Logger> {
    if LOGGER.get().is_some() {
        return Err(already_initialized());
    }

    let logger = builder.build()?;
    // Lost a race with a concurrent install: the rejected logger is dropped.
    LOGGER.set(logger).map_err(|_rejected| already_initialized())?;
    LOGGER.get().ok_or_else(already_initialized)
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// The installed logger, or `InvalidOperation` before [`install`]
pub fn logger() -> Result<&'static Logger> {
    LOGGER.get().ok_or_else(|| {
        LoggerError::invalid_operation("log", "the process-wide logger is not initialized")
    })
}

pub fn log(severity: Severity, message: impl Into<String>) -> Result<()> {
    logger()?.log(severity, message)
}

pub fn log_fmt(severity: Severity, args: fmt::Arguments<'_>) -> Result<()> {
    logger()?.log_fmt(severity, args)
}

pub fn fatal(message: impl Into<String>) -> Result<()> {
    log(Severity::Fatal, message)
}

pub fn error(message: impl Into<String>) -> Result<()> {
    log(Severity::Error, message)
}

pub fn warning(message: impl Into<String>) -> Result<()> {
    log(Severity::Warning, message)
}

pub fn information(message: impl Into<String>) -> Result<()> {
    log(Severity::Information, message)
}

pub fn debug(message: impl Into<String>) -> Result<()> {
    log(Severity::Debug, message)
}

pub fn verbose(message: impl Into<String>) -> Result<()> {
    log(Severity::Verbose, message)
}

/// Flush the process-wide logger's buffer
pub fn flush() -> Result<usize> {
    logger()?.flush()
}
