//! LogSink trait - delivery target interface
//!
//! Defines the abstract interface for sinks registered with the logging core.

use crate::{LogEntry, SinkError};

/// Delivery target for log entries
///
/// Sinks are shared between the registering code and the core's worker, so
/// `deliver` takes `&self`; sinks that hold mutable state guard it internally.
/// The core calls `deliver` from a single worker thread, one entry at a time.
pub trait LogSink: Send + Sync {
    /// Sink name (used for error reports and metrics)
    fn name(&self) -> &str;

    /// Deliver one entry
    ///
    /// # Errors
    /// Returns a sink-specific failure; the core reports it and moves on.
    fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError>;
}
