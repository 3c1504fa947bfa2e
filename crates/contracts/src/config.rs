//! Logging configuration contracts shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Severity;

/// Default history ring capacity
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default broadcast buffer for event subscribers
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Default size limit per log file (20 MB)
pub const DEFAULT_LOG_SIZE_LIMIT: u64 = 20 * 1000 * 1000;

/// Default number of log files kept, active file included
pub const DEFAULT_LOG_COUNT: usize = 10;

/// Logging core configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Least severe level that still passes the gate
    pub severity_threshold: Severity,

    /// Number of processed entries kept for diagnostics
    pub history_capacity: usize,

    /// Per-subscriber event buffer
    pub event_capacity: usize,

    /// Console sink
    pub console: ConsoleSinkConfig,

    /// Rotating file sink (disabled if absent)
    pub file: Option<FileSinkConfig>,

    /// OS event log sink (disabled if absent)
    pub event_log: Option<EventLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            severity_threshold: Severity::Informational,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            console: ConsoleSinkConfig::default(),
            file: None,
            event_log: None,
        }
    }
}

/// Console sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {
    pub enabled: bool,
    pub stream: ConsoleStream,
}

impl Default for ConsoleSinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stream: ConsoleStream::Stdout,
        }
    }
}

/// Standard stream targeted by the console sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Rotating file sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Directory holding the active and rotated files
    pub directory: PathBuf,

    /// File stem: active file is `<base_name>.log`, rotated `<base_name>_NN.log`
    pub base_name: String,

    /// Maximum size of the active file in bytes
    pub size_limit_bytes: u64,

    /// Maximum number of files kept, active file included
    pub retention_count: usize,

    /// Rotate once when the sink is opened, so each run starts a fresh file
    pub rotate_on_open: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            base_name: "app".to_string(),
            size_limit_bytes: DEFAULT_LOG_SIZE_LIMIT,
            retention_count: DEFAULT_LOG_COUNT,
            rotate_on_open: true,
        }
    }
}

/// OS event log sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// Event source name registered with the OS
    pub source: String,
}
