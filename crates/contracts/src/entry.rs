//! LogEntry and HistoryRecord

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::Severity;

/// A single log entry
///
/// Created once at the call site and passed by value through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    severity: Severity,
    timestamp: DateTime<Utc>,
    message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current UTC time
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self::with_timestamp(severity, Utc::now(), message)
    }

    /// Create an entry with an explicit timestamp
    pub fn with_timestamp(
        severity: Severity,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            timestamp,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Format as a single log line (no trailing newline)
    ///
    /// `<label> | <YYYY-MM-DD HH:mm:ss local> | <message>`
    pub fn format_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.severity.label(),
            self.timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            self.message
        )
    }
}

/// An entry retained in the history ring, tagged with its delivery sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Position in delivery order (wraps on overflow)
    pub sequence: u64,
    pub entry: LogEntry,
}
