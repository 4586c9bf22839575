//! Time-triggered flush thread

use super::error::{LoggerError, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Background thread that runs a flush every `interval`.
///
/// The wait between ticks is a `recv_timeout` on a shutdown channel, so
/// [`stop`](Self::stop) wakes the thread immediately. The thread runs one
/// last tick before it exits, draining whatever is still buffered.
#[derive(Debug)]
pub struct FlushScheduler {
    interval: Duration,
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FlushScheduler {
    pub fn spawn<F>(interval: Duration, tick: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (shutdown, signal) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("log-flush".to_string())
            .spawn(move || loop {
                match signal.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        tick();
                        break;
                    }
                }
            })
            .map_err(|e| {
                LoggerError::io_operation("spawning flush thread", "thread spawn failed", e)
            })?;

        Ok(Self {
            interval,
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait up to `timeout` for it to finish.
    ///
    /// Returns `true` if the thread exited cleanly within the timeout.
    /// Calling `stop` again after it returned is a no-op returning `true`.
    pub fn stop(&mut self, timeout: Duration) -> bool {
        // Closing the channel wakes the thread even if the signal slot is full.
        drop(self.shutdown.take());

        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Flush thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Flush thread did not finish within {:?} timeout. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(5));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_ticks_periodically() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let mut scheduler = FlushScheduler::spawn(Duration::from_millis(20), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(150));
        assert!(ticks.load(Ordering::SeqCst) >= 2);
        assert!(scheduler.stop(Duration::from_secs(1)));
    }

    #[test]
    fn test_stop_wakes_and_runs_final_tick() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let mut scheduler = FlushScheduler::spawn(Duration::from_secs(3600), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        assert!(scheduler.is_running());

        let start = Instant::now();
        assert!(scheduler.stop(Duration::from_secs(1)));
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_running());

        // Second stop is a no-op
        assert!(scheduler.stop(Duration::from_millis(10)));
    }
}
