//! Default sink writing to the process debug stream (stderr)

use crate::core::{Result, Sink};
use std::io::{self, Write};

/// Writes each line of a batch to stderr, one line per entry, in batch order.
///
/// Installed automatically when a logger is built without any sink.
#[derive(Debug, Default)]
pub struct DebugStreamSink;

impl DebugStreamSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for DebugStreamSink {
    fn write_batch(&mut self, batch: &[String]) -> Result<()> {
        let mut stderr = io::stderr().lock();
        for line in batch {
            writeln!(stderr, "{}", line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "debug-stream"
    }
}
