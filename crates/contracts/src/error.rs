//! Layered error definitions
//!
//! Categorized by source: config / sink / rotation

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sink Errors =====
    /// A sink failed to accept an entry
    #[error(transparent)]
    Sink(#[from] SinkError),

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error returned by [`crate::LogSink::deliver`]
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink could not write the entry
    #[error("sink '{sink_name}' write error: {message}")]
    Write { sink_name: String, message: String },

    /// Underlying IO failure while writing
    #[error("sink '{sink_name}' io error: {source}")]
    Io {
        sink_name: String,
        #[source]
        source: std::io::Error,
    },

    /// A rotation pass stopped part-way; the entry itself was written
    #[error("rotation failed at '{}': {source}", path.display())]
    Rotation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sink panicked while handling the entry
    #[error("sink '{sink_name}' panicked: {message}")]
    Panicked { sink_name: String, message: String },
}

impl SinkError {
    /// Create sink write error
    pub fn write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Wrap an io error raised by the named sink
    pub fn io(sink_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            sink_name: sink_name.into(),
            source,
        }
    }

    /// Create rotation error for the file operation that failed
    pub fn rotation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Rotation {
            path: path.into(),
            source,
        }
    }
}
