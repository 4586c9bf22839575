//! In-memory line buffer and flush protocol

use super::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::time::Duration;

/// Whether lines are batched in memory before reaching the sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferMode {
    /// Every line is dispatched on the emitting thread
    #[default]
    Disabled,
    /// Lines are queued and flushed at `capacity` or every `flush_interval`
    Enabled {
        capacity: usize,
        flush_interval: Duration,
    },
}

impl BufferMode {
    /// Buffering with a zero capacity or a zero interval is forced to `Disabled`
    pub fn new(capacity: usize, flush_interval: Duration) -> Self {
        if capacity == 0 || flush_interval.is_zero() {
            BufferMode::Disabled
        } else {
            BufferMode::Enabled {
                capacity,
                flush_interval,
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, BufferMode::Enabled { .. })
    }
}

#[derive(Debug)]
struct Queue {
    lines: Vec<String>,
    sealed: bool,
}

/// Thread-safe queue of formatted lines.
///
/// Two locks are involved. `entries` guards the queue and is only held for
/// a push or a drain, never while sinks run. `flush_gate` serializes whole
/// flushes, so batches leave the buffer and reach the sinks in the same
/// order and no two flushes can split one drain between them.
///
/// Once [`seal`](Self::seal)ed, pushes are rejected while queued lines can
/// still be drained.
#[derive(Debug)]
pub struct LogBuffer {
    entries: Mutex<Queue>,
    flush_gate: Mutex<()>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Queue {
                lines: Vec::with_capacity(capacity),
                sealed: false,
            }),
            flush_gate: Mutex::new(()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().lines.is_empty()
    }

    /// Append a line. Returns `true` when the queue reached capacity and a
    /// flush is due.
    ///
    /// Fails with `InvalidOperation` once the buffer is sealed; capacity
    /// never rejects a line.
    pub fn push(&self, line: String) -> Result<bool> {
        let mut entries = self.entries.lock();
        if entries.sealed {
            return Err(LoggerError::invalid_operation(
                "log",
                "logger has been shut down",
            ));
        }
        entries.lines.push(line);
        Ok(entries.lines.len() >= self.capacity)
    }

    /// Reject every later push. Lines already queued stay drainable.
    pub fn seal(&self) {
        self.entries.lock().sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.entries.lock().sealed
    }

    /// Take every queued line, leaving the queue empty
    fn drain(&self) -> Vec<String> {
        let mut entries = self.entries.lock();
        std::mem::replace(&mut entries.lines, Vec::with_capacity(self.capacity))
    }

    /// Drain the queue and hand the batch to `deliver`.
    ///
    /// Returns the number of lines drained. An empty queue drains nothing and
    /// `deliver` is not called. A drained batch is never put back, even when
    /// `deliver` fails.
    pub fn flush_with<F>(&self, deliver: F) -> Result<usize>
    where
        F: FnOnce(&[String]) -> Result<()>,
    {
        let _gate = self.flush_gate.lock();

        let batch = self.drain();
        if batch.is_empty() {
            return Ok(0);
        }

        deliver(&batch)?;
        Ok(batch.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_mode_forced_disabled() {
        assert_eq!(BufferMode::new(0, Duration::from_secs(1)), BufferMode::Disabled);
        assert_eq!(BufferMode::new(10, Duration::ZERO), BufferMode::Disabled);
        assert!(BufferMode::new(10, Duration::from_millis(5)).is_enabled());
    }

    #[test]
    fn test_push_signals_capacity() {
        let buffer = LogBuffer::new(3);
        assert!(!buffer.push("a".to_string()).unwrap());
        assert!(!buffer.push("b".to_string()).unwrap());
        assert!(buffer.push("c".to_string()).unwrap());
        // Capacity is advisory
        assert!(buffer.push("d".to_string()).unwrap());
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_flush_drains_in_order() {
        let buffer = LogBuffer::new(10);
        for line in ["a", "b", "c"] {
            buffer.push(line.to_string()).unwrap();
        }

        let mut delivered = Vec::new();
        let count = buffer
            .flush_with(|batch| {
                delivered.extend_from_slice(batch);
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(delivered, ["a", "b", "c"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_flush_skips_delivery() {
        let buffer = LogBuffer::new(2);
        let count = buffer
            .flush_with(|_| panic!("must not deliver an empty batch"))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_failed_delivery_is_not_requeued() {
        let buffer = LogBuffer::new(2);
        buffer.push("lost".to_string()).unwrap();

        let result = buffer.flush_with(|_| Err(LoggerError::writer("down")));

        assert!(result.is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sealed_buffer_rejects_push_but_drains() {
        let buffer = LogBuffer::new(10);
        buffer.push("queued".to_string()).unwrap();
        buffer.seal();

        assert!(buffer.is_sealed());
        assert!(buffer
            .push("late".to_string())
            .unwrap_err()
            .is_invalid_operation());

        let mut delivered = Vec::new();
        buffer
            .flush_with(|batch| {
                delivered.extend_from_slice(batch);
                Ok(())
            })
            .unwrap();
        assert_eq!(delivered, ["queued"]);
    }

    #[test]
    fn test_concurrent_push_and_flush_lose_nothing() {
        let buffer = Arc::new(LogBuffer::new(1_000_000));
        let delivered = Arc::new(Mutex::new(Vec::new()));

        let producers: Vec<_> = (0..4)
            .map(|t| {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || {
                    for i in 0..500 {
                        buffer.push(format!("{}-{}", t, i)).unwrap();
                    }
                })
            })
            .collect();

        let flusher = {
            let buffer = Arc::clone(&buffer);
            let delivered = Arc::clone(&delivered);
            thread::spawn(move || {
                for _ in 0..200 {
                    buffer
                        .flush_with(|batch| {
                            delivered.lock().extend_from_slice(batch);
                            Ok(())
                        })
                        .unwrap();
                }
            })
        };

        for producer in producers {
            producer.join().unwrap();
        }
        flusher.join().unwrap();
        buffer
            .flush_with(|batch| {
                delivered.lock().extend_from_slice(batch);
                Ok(())
            })
            .unwrap();

        let mut delivered = delivered.lock().clone();
        delivered.sort();
        let mut expected: Vec<_> = (0..4)
            .flat_map(|t| (0..500).map(move |i| format!("{}-{}", t, i)))
            .collect();
        expected.sort();
        assert_eq!(delivered, expected);
    }
}
