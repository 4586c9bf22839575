//! Logger metrics for observability
//!
//! Counters for the emission and delivery path: how many lines were
//! emitted or filtered, how many flushes ran, and how many sink calls failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use batch_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines that passed the level gate and were rendered
    emitted: AtomicU64,

    /// Messages rejected by the level gate
    filtered: AtomicU64,

    /// Flushes that drained a non-empty batch
    flushes: AtomicU64,

    /// Lines handed to the sink registry
    lines_dispatched: AtomicU64,

    /// Individual sink calls that returned an error or panicked
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            lines_dispatched: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_dispatched(&self) -> u64 {
        self.lines_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a flush that delivered `lines` lines
    #[inline]
    pub fn record_flush(&self, lines: usize) -> u64 {
        self.lines_dispatched.fetch_add(lines as u64, Ordering::Relaxed);
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a direct, unbuffered dispatch of `lines` lines
    #[inline]
    pub fn record_dispatch(&self, lines: usize) -> u64 {
        self.lines_dispatched.fetch_add(lines as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failures(&self, count: usize) -> u64 {
        self.sink_failures.fetch_add(count as u64, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
        self.lines_dispatched.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted()),
            filtered: AtomicU64::new(self.filtered()),
            flushes: AtomicU64::new(self.flushes()),
            lines_dispatched: AtomicU64::new(self.lines_dispatched()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}
