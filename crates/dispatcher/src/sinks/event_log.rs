//! EventLogSink - OS event log target
//!
//! The OS API sits behind [`EventLogWriter`]. Severities collapse onto the
//! three event classes; `Debug` entries are never written.

use std::io;

use contracts::{ContractError, LogEntry, LogSink, Severity, SinkError};
use tracing::{error, info, warn};

/// Event class understood by the OS event log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Error,
    Warning,
    Information,
}

impl EventKind {
    /// Map a severity; `None` means the entry is not written
    pub fn from_severity(severity: Severity) -> Option<Self> {
        match severity {
            Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
                Some(EventKind::Error)
            }
            Severity::Warning => Some(EventKind::Warning),
            Severity::Notice | Severity::Informational => Some(EventKind::Information),
            Severity::Debug => None,
        }
    }
}

/// Port to the platform event log
pub trait EventLogWriter: Send + Sync {
    /// Make sure `source` exists (may need elevated rights)
    fn register_source(&self, _source: &str) -> io::Result<()> {
        Ok(())
    }

    /// Write one event
    fn write_event(&self, source: &str, message: &str, kind: EventKind) -> io::Result<()>;
}

/// Writer forwarding events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

impl EventLogWriter for TracingEventLog {
    fn write_event(&self, source: &str, message: &str, kind: EventKind) -> io::Result<()> {
        match kind {
            EventKind::Error => error!(target: "event_log", source, "{message}"),
            EventKind::Warning => warn!(target: "event_log", source, "{message}"),
            EventKind::Information => info!(target: "event_log", source, "{message}"),
        }
        Ok(())
    }
}

/// Sink writing entries to an event log under a fixed source name
pub struct EventLogSink<W = TracingEventLog> {
    name: String,
    source: String,
    writer: W,
}

impl EventLogSink<TracingEventLog> {
    /// Create a sink using the tracing-backed writer
    pub fn new(source: impl Into<String>) -> Result<Self, ContractError> {
        Self::with_writer(source, TracingEventLog)
    }
}

impl<W: EventLogWriter> EventLogSink<W> {
    /// Create a sink on a specific writer, registering the source first
    ///
    /// # Errors
    /// - Empty source name
    /// - The writer refused to register the source
    pub fn with_writer(source: impl Into<String>, writer: W) -> Result<Self, ContractError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(ContractError::config_validation(
                "event_log.source",
                "must not be empty",
            ));
        }
        writer.register_source(&source)?;

        Ok(Self {
            name: format!("event_log:{source}"),
            source,
            writer,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<W: EventLogWriter> LogSink for EventLogSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let Some(kind) = EventKind::from_severity(entry.severity()) else {
            return Ok(());
        };

        self.writer
            .write_event(&self.source, entry.message(), kind)
            .map_err(|e| SinkError::io(&self.name, e))
    }
}
