//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::{self, Write};

/// Writes lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write_batch(&mut self, batch: &[String]) -> Result<()> {
        // Hold the lock for the whole batch so lines from concurrent writers
        // cannot interleave inside it.
        let mut stdout = io::stdout().lock();
        for line in batch {
            writeln!(stdout, "{}", line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
