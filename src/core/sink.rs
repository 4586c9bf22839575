//! Sink trait for log output destinations

use super::error::Result;

/// An output destination that consumes batches of pre-formatted lines.
///
/// A sink is called with one or more lines per call, never with an empty
/// batch. Calls to one sink are serialized and arrive in flush order.
pub trait Sink: Send {
    fn write_batch(&mut self, batch: &[String]) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
