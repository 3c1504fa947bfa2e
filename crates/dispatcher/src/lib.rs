//! # Dispatcher
//!
//! Asynchronous log dispatch engine.
//!
//! Responsibilities:
//! - Gate `LogEntry` submissions on a severity threshold
//! - Queue accepted entries for a single background worker
//! - Fan-out to every registered sink, isolating sink failures
//! - Keep a bounded history and announce changes to subscribers

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod events;
mod history;
pub mod metrics;
mod registry;
pub mod reporter;
pub mod sinks;
mod worker;

pub use contracts::{HistoryRecord, LogEntry, LogSink, Severity, SinkError};
pub use context::LoggingContext;
pub use dispatcher::{create_core, LoggingCore, LoggingCoreBuilder};
pub use error::DispatcherError;
pub use events::CoreEvent;
pub use metrics::{CoreMetrics, MetricsSnapshot};
pub use reporter::{ErrorReporter, TracingErrorReporter};
pub use sinks::{
    ConsoleSink, EventKind, EventLogSink, EventLogWriter, FeedbackSink, RotatingFileSink,
    TracingEventLog,
};
