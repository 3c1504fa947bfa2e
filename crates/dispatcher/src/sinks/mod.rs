//! Sink implementations
//!
//! Contains ConsoleSink, RotatingFileSink, EventLogSink and FeedbackSink.

mod console;
mod event_log;
mod feedback;
mod file;
pub mod rotation;

pub use self::console::ConsoleSink;
pub use self::event_log::{EventKind, EventLogSink, EventLogWriter, TracingEventLog};
pub use self::feedback::FeedbackSink;
pub use self::file::RotatingFileSink;
pub use self::rotation::{LogLayout, RotationOutcome};
