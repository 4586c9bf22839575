//! Core logger types and traits

pub mod buffer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod level_gate;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod scheduler;
pub mod severity;
pub mod sink;

pub use buffer::{BufferMode, LogBuffer};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result, SinkError};
pub use formatter::{DatePattern, Formatter, MessageTemplate, DEFAULT_DATE_PATTERN, DEFAULT_TEMPLATE};
pub use level_gate::LevelGate;
pub use logger::{AddendumFn, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use registry::SinkRegistry;
pub use scheduler::FlushScheduler;
pub use severity::Severity;
pub use sink::Sink;
