//! Sink implementations

pub mod console;
pub mod debug_stream;
#[cfg(feature = "file")]
pub mod file;
pub mod function;

pub use console::ConsoleSink;
pub use debug_stream::DebugStreamSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use function::FnSink;

pub use crate::core::Sink;
