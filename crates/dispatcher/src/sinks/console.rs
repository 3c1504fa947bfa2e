//! ConsoleSink - writes formatted lines to a stream

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use contracts::{ConsoleStream, LogEntry, LogSink, SinkError};

/// Sink that writes one formatted line per entry to stdout, stderr or any writer
pub struct ConsoleSink {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Write to standard output
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::with_writer(name, io::stdout())
    }

    /// Write to standard error
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::with_writer(name, io::stderr())
    }

    /// Write to the configured standard stream
    pub fn from_stream(name: impl Into<String>, stream: ConsoleStream) -> Self {
        match stream {
            ConsoleStream::Stdout => Self::stdout(name),
            ConsoleStream::Stderr => Self::stderr(name),
        }
    }

    /// Write to an arbitrary stream
    pub fn with_writer<W: Write + Send + 'static>(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let line = entry.format_line();
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| SinkError::io(&self.name, e))
    }
}
