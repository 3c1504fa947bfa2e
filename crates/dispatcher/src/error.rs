//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Only construction can fail; submission and delivery never return errors
/// to the caller.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Invalid construction argument
    #[error("invalid configuration '{field}': {message}")]
    Configuration { field: String, message: String },

    /// Sink creation error
    #[error("failed to create sink '{name}': {source}")]
    SinkCreation {
        name: String,
        #[source]
        source: contracts::ContractError,
    },

    /// Worker thread could not be started
    #[error("failed to spawn logging worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl DispatcherError {
    /// Create a configuration error
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, source: contracts::ContractError) -> Self {
        Self::SinkCreation {
            name: name.into(),
            source,
        }
    }
}
