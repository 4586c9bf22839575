//! Closure-backed sink

use crate::core::{Result, Sink};

/// Adapts a closure into a [`Sink`].
///
/// # Example
///
/// ```
/// use batch_logger::sinks::FnSink;
/// use batch_logger::Sink;
///
/// let mut sink = FnSink::new("stdout", |batch: &[String]| {
///     for line in batch {
///         println!("{}", line);
///     }
///     Ok(())
/// });
/// sink.write_batch(&["hello".to_string()]).unwrap();
/// ```
pub struct FnSink<F> {
    name: String,
    func: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&[String]) -> Result<()> + Send,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&[String]) -> Result<()> + Send,
{
    fn write_batch(&mut self, batch: &[String]) -> Result<()> {
        (self.func)(batch)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSink").field("name", &self.name).finish()
    }
}
