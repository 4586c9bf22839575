//! # Batch Logger
//!
//! A leveled, sink-based logging facility for resource-constrained
//! environments. Lines are formatted from a positional template, filtered by
//! severity, optionally batched in memory and delivered to pluggable sinks.
//!
//! ## Features
//!
//! - **Configure once**: a fluent builder produces an immutable [`Logger`]
//! - **Batching**: size- and time-triggered flushes keep sink I/O off the hot path
//! - **Isolated sinks**: a failing or panicking sink never blocks the others
//! - **Process-wide logger**: optional one-time global installation
//!
//! ```
//! use batch_logger::prelude::*;
//! use std::time::Duration;
//!
//! let logger = Logger::builder()
//!     .min_level(Severity::Debug)
//!     .sink(ConsoleSink::new())
//!     .buffered(3, Duration::from_secs(5))
//!     .build()?;
//!
//! logger.information("sensor online")?;
//! logger.verbose("filtered out")?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::sinks::{ConsoleSink, DebugStreamSink, FnSink};
    pub use crate::core::{
        BufferMode, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
        Severity, Sink, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use sinks::{ConsoleSink, DebugStreamSink, FnSink};
pub use crate::core::{
    AddendumFn, BufferMode, Formatter, LevelGate, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Result, Severity, Sink, SinkError, DEFAULT_SHUTDOWN_TIMEOUT,
};
