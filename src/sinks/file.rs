//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file.
///
/// Each batch is written under an exclusive advisory lock so several
/// processes can share one log file without interleaving batches.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_batch(&mut self, batch: &[String]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.get_ref().lock_exclusive().map_err(|e| {
            LoggerError::io_operation(
                "locking log file",
                format!("cannot lock '{}'", self.path.display()),
                e,
            )
        })?;

        let written = batch
            .iter()
            .try_for_each(|line| writeln!(writer, "{}", line))
            .and_then(|()| writer.flush());
        let unlocked = FileExt::unlock(writer.get_ref());

        written?;
        unlocked?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
