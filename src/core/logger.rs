//! Main logger implementation

use super::{
    buffer::{BufferMode, LogBuffer},
    config::LoggerConfig,
    error::{panic_message, LoggerError, Result},
    formatter::{Formatter, DEFAULT_DATE_PATTERN, DEFAULT_TEMPLATE},
    level_gate::LevelGate,
    metrics::LoggerMetrics,
    registry::SinkRegistry,
    scheduler::FlushScheduler,
    severity::Severity,
    sink::Sink,
};
use crate::sinks::FnSink;
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Producer of the suffix appended to every emitted line
pub type AddendumFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// State shared between the logger handle and its flush thread
struct Shared {
    gate: LevelGate,
    formatter: Formatter,
    addendum: Option<AddendumFn>,
    registry: SinkRegistry,
    buffer: Option<LogBuffer>,
    metrics: LoggerMetrics,
    stopped: AtomicBool,
}

impl Shared {
    fn render(&self, severity: Severity, message: &str) -> Result<String> {
        let addendum = match &self.addendum {
            Some(producer) => catch_unwind(AssertUnwindSafe(|| producer()))
                .map_err(|panic_info| LoggerError::AddendumFailure(panic_message(panic_info.as_ref())))?,
            None => None,
        };

        Ok(self
            .formatter
            .render(severity, &Utc::now(), message, addendum.as_deref()))
    }

    fn deliver(&self, line: String) -> Result<()> {
        match &self.buffer {
            Some(buffer) => {
                let full = buffer.push(line)?;
                self.metrics.record_emitted();
                // A line logged from inside a sink waits for the next flush.
                if full && !self.registry.is_dispatching() {
                    self.flush_buffer(buffer)?;
                }
                Ok(())
            }
            None => {
                self.metrics.record_emitted();
                self.metrics.record_dispatch(1);
                self.dispatch(std::slice::from_ref(&line))
            }
        }
    }

    fn dispatch(&self, batch: &[String]) -> Result<()> {
        self.registry.dispatch(batch).inspect_err(|e| {
            if let LoggerError::SinkFailure { failures } = e {
                self.metrics.record_sink_failures(failures.len());
            }
        })
    }

    fn flush_buffer(&self, buffer: &LogBuffer) -> Result<usize> {
        if self.registry.is_dispatching() {
            return Err(LoggerError::invalid_operation(
                "flush",
                "called from a sink of the same logger",
            ));
        }
        buffer.flush_with(|batch| {
            self.metrics.record_flush(batch.len());
            self.dispatch(batch)
        })
    }

    /// Time-triggered flush; failures have no caller to return to
    fn scheduled_flush(&self) {
        if let Some(buffer) = &self.buffer {
            if let Err(e) = self.flush_buffer(buffer) {
                eprintln!("[LOGGER ERROR] Scheduled flush failed: {}", e);
            }
        }
    }
}

/// A built, immutable logger.
///
/// Cheap to share by reference across threads. Every emission method returns
/// a [`Result`]: misuse and sink failures are reported to the caller rather
/// than swallowed.
pub struct Logger {
    shared: Arc<Shared>,
    scheduler: Mutex<Option<FlushScheduler>>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use batch_logger::prelude::*;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(Severity::Debug)
    ///     .buffered(32, Duration::from_secs(1))
    ///     .build()
    ///     .unwrap();
    /// logger.information("ready").unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Emit `message` at `severity` if it passes the level floor
    pub fn log(&self, severity: Severity, message: impl Into<String>) -> Result<()> {
        self.emit(severity, || message.into())
    }

    /// Emit pre-built format arguments; formatting is skipped when filtered.
    ///
    /// This is what the `fatal!` .. `verbose!` macros expand to.
    pub fn log_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<()> {
        self.emit(severity, || fmt::format(args))
    }

    fn emit<F>(&self, severity: Severity, message: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if self.shared.stopped.load(Ordering::Acquire) {
            return Err(LoggerError::invalid_operation(
                "log",
                "logger has been shut down",
            ));
        }

        if !self.shared.gate.should_emit(severity) {
            self.shared.metrics.record_filtered();
            return Ok(());
        }

        let line = self.shared.render(severity, &message())?;
        self.shared.deliver(line)
    }

    /// `true` when a message at `severity` would be emitted
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.shared.gate.should_emit(severity)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Fatal, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Error, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Warning, message)
    }

    #[inline]
    pub fn information(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Information, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Debug, message)
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) -> Result<()> {
        self.log(Severity::Verbose, message)
    }

    /// Drain the buffer and deliver it to every sink.
    ///
    /// Returns the number of lines delivered; an empty buffer calls no sink.
    /// Fails with `InvalidOperation` when buffering is disabled or when
    /// called from one of this logger's own sinks.
    pub fn flush(&self) -> Result<usize> {
        let buffer = self.shared.buffer.as_ref().ok_or_else(|| {
            LoggerError::invalid_operation("flush", "buffering is disabled for this logger")
        })?;
        self.shared.flush_buffer(buffer)
    }

    pub fn min_level(&self) -> Severity {
        self.shared.gate.floor()
    }

    pub fn buffer_mode(&self) -> BufferMode {
        match (&self.shared.buffer, self.scheduler.lock().as_ref()) {
            (Some(buffer), Some(scheduler)) => BufferMode::Enabled {
                capacity: buffer.capacity(),
                flush_interval: scheduler.interval(),
            },
            _ => BufferMode::Disabled,
        }
    }

    /// Number of lines waiting in the buffer
    pub fn pending(&self) -> usize {
        self.shared.buffer.as_ref().map_or(0, LogBuffer::len)
    }

    pub fn sink_names(&self) -> Vec<String> {
        self.shared.registry.names()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use batch_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .sink_fn("discard", |_| Ok(()))
    ///     .build()
    ///     .unwrap();
    /// logger.information("counted").unwrap();
    /// logger.verbose("filtered").unwrap();
    ///
    /// assert_eq!(logger.metrics().emitted(), 1);
    /// assert_eq!(logger.metrics().filtered(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.stopped.load(Ordering::Acquire)
    }

    /// Stop the flush thread, deliver what is still buffered and flush every sink.
    ///
    /// Later emissions fail with `InvalidOperation`. Calling it again is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if shutdown completed within `timeout` and the final delivery
    /// succeeded, `false` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use batch_logger::prelude::*;
    /// use std::time::Duration;
    ///
    /// let logger = Logger::builder()
    ///     .buffered(100, Duration::from_secs(60))
    ///     .sink_fn("discard", |_| Ok(()))
    ///     .build()
    ///     .unwrap();
    /// logger.warning("about to stop").unwrap();
    ///
    /// assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
    /// assert_eq!(logger.pending(), 0);
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        if self.shared.stopped.swap(true, Ordering::AcqRel) {
            return true;
        }

        let mut clean = match self.scheduler.lock().as_mut() {
            Some(scheduler) => scheduler.stop(timeout),
            None => true,
        };

        // Covers a flush thread that timed out. Sealing first means an
        // emission racing this call either lands before the drain or fails.
        if let Some(buffer) = &self.shared.buffer {
            buffer.seal();
            if let Err(e) = self.shared.flush_buffer(buffer) {
                eprintln!("[LOGGER ERROR] Final flush failed during shutdown: {}", e);
                clean = false;
            }
        }

        if let Err(e) = self.shared.registry.flush_all() {
            eprintln!("[LOGGER ERROR] Failed to flush sinks during shutdown: {}", e);
            clean = false;
        }

        clean
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let failures = self.shared.metrics.sink_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down after {} failed sink calls",
                failures
            );
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level())
            .field("formatter", &self.shared.formatter)
            .field("sinks", &self.shared.registry)
            .field("buffer_mode", &self.buffer_mode())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use batch_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .format("{0} {1} {2}")
///     .date_format("%H:%M:%S")
///     .min_level(Severity::Debug)
///     .addendum(|| Some("node=7".to_string()))
///     .sink(ConsoleSink::new())
///     .buffered(64, Duration::from_millis(500))
///     .build()
///     .unwrap();
/// logger.debug("configured").unwrap();
/// ```
pub struct LoggerBuilder {
    template: String,
    date_format: String,
    min_level: Severity,
    addendum: Option<AddendumFn>,
    sinks: Vec<Box<dyn Sink>>,
    buffer_mode: BufferMode,
    sink_pacing: Duration,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            date_format: DEFAULT_DATE_PATTERN.to_string(),
            min_level: Severity::default(),
            addendum: None,
            sinks: Vec::new(),
            buffer_mode: BufferMode::Disabled,
            sink_pacing: Duration::ZERO,
        }
    }

    /// Start from a plain configuration record
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            template: config.format.clone(),
            date_format: config.date_format.clone(),
            min_level: config.min_level,
            buffer_mode: config.buffer_mode(),
            sink_pacing: Duration::from_millis(config.sink_pacing_ms),
            ..Self::new()
        }
    }

    /// Set the message template (`{0}` date, `{1}` severity code, `{2}` message)
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the strftime date pattern
    #[must_use = "builder methods return a new value"]
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    /// Set the addendum producer, called once per emitted line
    #[must_use = "builder methods return a new value"]
    pub fn addendum<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.addendum = Some(Arc::new(producer));
        self
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add a closure as a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink_fn<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: FnMut(&[String]) -> Result<()> + Send + 'static,
    {
        self.sink(FnSink::new(name, func))
    }

    /// Replace the sink list
    #[must_use = "builder methods return a new value"]
    pub fn sinks(mut self, sinks: impl IntoIterator<Item = Box<dyn Sink>>) -> Self {
        self.sinks = sinks.into_iter().collect();
        self
    }

    /// Enable buffering. A zero capacity or interval leaves buffering disabled.
    #[must_use = "builder methods return a new value"]
    pub fn buffered(mut self, capacity: usize, flush_interval: Duration) -> Self {
        self.buffer_mode = BufferMode::new(capacity, flush_interval);
        self
    }

    /// Disable buffering (the default)
    #[must_use = "builder methods return a new value"]
    pub fn unbuffered(mut self) -> Self {
        self.buffer_mode = BufferMode::Disabled;
        self
    }

    /// Pause between consecutive sink calls of one dispatch
    #[must_use = "builder methods return a new value"]
    pub fn sink_pacing(mut self, pacing: Duration) -> Self {
        self.sink_pacing = pacing;
        self
    }

    /// Build the Logger
    ///
    /// Validates the template and date pattern, installs the default sink if
    /// none was added and starts the flush thread when buffering is enabled.
    pub fn build(self) -> Result<Logger> {
        let formatter = Formatter::new(&self.template, &self.date_format)?;

        let buffer = match self.buffer_mode {
            BufferMode::Enabled { capacity, .. } => Some(LogBuffer::new(capacity)),
            BufferMode::Disabled => None,
        };

        let shared = Arc::new(Shared {
            gate: LevelGate::new(self.min_level),
            formatter,
            addendum: self.addendum,
            registry: SinkRegistry::new(self.sinks, self.sink_pacing),
            buffer,
            metrics: LoggerMetrics::new(),
            stopped: AtomicBool::new(false),
        });

        let scheduler = match self.buffer_mode {
            BufferMode::Enabled { flush_interval, .. } => {
                let shared = Arc::clone(&shared);
                Some(FlushScheduler::spawn(flush_interval, move || {
                    shared.scheduled_flush()
                })?)
            }
            BufferMode::Disabled => None,
        };

        Ok(Logger {
            shared,
            scheduler: Mutex::new(scheduler),
        })
    }

    /// Build the logger and install it as the process-wide instance.
    ///
    /// Fails with `InvalidOperation` if a process-wide logger already exists.
    pub fn init(self) -> Result<&'static Logger> {
        crate::global::install(self)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
