//! Ordered sink fan-out

use super::error::{panic_message, LoggerError, Result, SinkError};
use super::sink::Sink;
use crate::sinks::DebugStreamSink;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

thread_local! {
    // Registries currently running sinks on this thread
    static ACTIVE: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a registry as running its sinks on the current thread
struct DispatchGuard {
    key: usize,
}

impl DispatchGuard {
    fn enter(key: usize) -> Option<Self> {
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&key) {
                None
            } else {
                active.push(key);
                Some(Self { key })
            }
        })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.borrow_mut().retain(|k| *k != self.key));
    }
}

/// Ordered collection of sinks sharing every dispatched batch.
///
/// Each sink sits behind its own lock, so calls to a single sink are
/// serialized while different sinks never wait on each other's state.
///
/// A sink that calls back into the registry running it (for instance by
/// logging through the owning logger) gets `InvalidOperation` instead of
/// blocking on its own lock.
pub struct SinkRegistry {
    sinks: Vec<Mutex<Box<dyn Sink>>>,
    names: Vec<String>,
    pacing: Duration,
}

impl SinkRegistry {
    /// Build a registry; an empty list installs [`DebugStreamSink`].
    pub fn new(sinks: Vec<Box<dyn Sink>>, pacing: Duration) -> Self {
        let sinks = if sinks.is_empty() {
            vec![Box::new(DebugStreamSink::new()) as Box<dyn Sink>]
        } else {
            sinks
        };

        let names = sinks.iter().map(|s| s.name().to_string()).collect();

        Self {
            sinks: sinks.into_iter().map(Mutex::new).collect(),
            names,
            pacing,
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// `true` while this registry is running sinks on the calling thread
    pub fn is_dispatching(&self) -> bool {
        let key = self.key();
        ACTIVE.with(|active| active.borrow().contains(&key))
    }

    fn key(&self) -> usize {
        self as *const Self as usize
    }

    /// Hand `batch` to every sink in registration order.
    ///
    /// A sink that errors or panics does not stop the fan-out; failures are
    /// collected and returned together once every sink was attempted.
    /// Empty batches are not dispatched.
    pub fn dispatch(&self, batch: &[String]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        self.for_each_sink("write", |sink| sink.write_batch(batch), true)
    }

    /// Flush every sink, with the same isolation as [`dispatch`](Self::dispatch)
    pub fn flush_all(&self) -> Result<()> {
        self.for_each_sink("flush", |sink| sink.flush(), false)
    }

    fn for_each_sink<F>(&self, action: &str, mut op: F, paced: bool) -> Result<()>
    where
        F: FnMut(&mut dyn Sink) -> Result<()>,
    {
        let _guard = DispatchGuard::enter(self.key()).ok_or_else(|| {
            LoggerError::invalid_operation(action, "called from a sink of the same logger")
        })?;

        let mut failures = Vec::new();

        for (idx, slot) in self.sinks.iter().enumerate() {
            if paced && idx > 0 && !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }

            let mut sink = slot.lock();
            let outcome = catch_unwind(AssertUnwindSafe(|| op(sink.as_mut())));

            let message = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => format!("{} failed: {}", action, e),
                Err(panic_info) => {
                    format!("panicked during {}: {}", action, panic_message(panic_info.as_ref()))
                }
            };

            failures.push(SinkError {
                index: idx,
                name: sink.name().to_string(),
                message,
            });
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::SinkFailure { failures })
        }
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("sinks", &self.names)
            .field("pacing", &self.pacing)
            .finish()
    }
}
