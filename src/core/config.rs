//! Plain configuration record

use super::buffer::BufferMode;
use super::error::Result;
use super::formatter::{Formatter, DEFAULT_DATE_PATTERN, DEFAULT_TEMPLATE};
use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serializable logger settings.
///
/// Sinks and the addendum producer are code, so they are added on the
/// [`LoggerBuilder`](super::LoggerBuilder) returned by
/// [`from_config`](super::LoggerBuilder::from_config).
///
/// # Example
///
/// ```
/// use batch_logger::{LoggerBuilder, LoggerConfig, Severity};
///
/// let config = LoggerConfig {
///     min_level: Severity::Debug,
///     buffer_capacity: 16,
///     flush_interval_ms: 250,
///     ..LoggerConfig::default()
/// };
/// config.validate().unwrap();
/// let logger = LoggerBuilder::from_config(&config).build().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Message template, see [`Formatter`]
    pub format: String,
    /// strftime date pattern
    pub date_format: String,
    pub min_level: Severity,
    /// Lines held before a size-triggered flush; 0 disables buffering
    pub buffer_capacity: usize,
    /// Time-triggered flush period; 0 disables buffering
    pub flush_interval_ms: u64,
    /// Pause between consecutive sink calls
    pub sink_pacing_ms: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_TEMPLATE.to_string(),
            date_format: DEFAULT_DATE_PATTERN.to_string(),
            min_level: Severity::default(),
            buffer_capacity: 0,
            flush_interval_ms: 0,
            sink_pacing_ms: 0,
        }
    }
}

impl LoggerConfig {
    pub fn buffer_mode(&self) -> BufferMode {
        BufferMode::new(
            self.buffer_capacity,
            Duration::from_millis(self.flush_interval_ms),
        )
    }

    /// Check the template and date pattern without building a logger
    pub fn validate(&self) -> Result<()> {
        Formatter::new(&self.format, &self.date_format).map(|_| ())
    }
}
