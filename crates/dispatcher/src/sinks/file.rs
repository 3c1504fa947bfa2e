//! RotatingFileSink - appends formatted lines with size-bounded rotation

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use contracts::{ContractError, FileSinkConfig, LogEntry, LogSink, SinkError};
use tracing::{debug, instrument, warn};

use super::rotation::{self, LogLayout};

/// Sink that appends to `<directory>/<base_name>.log`
///
/// Before an append that would push the active file past the size limit,
/// the existing files are rotated so the entry starts a fresh active file.
/// Append and rotation run under one lock.
pub struct RotatingFileSink {
    name: String,
    layout: LogLayout,
    size_limit: u64,
    retention_count: usize,
    write_lock: Mutex<()>,
}

impl RotatingFileSink {
    /// Create a new RotatingFileSink
    ///
    /// # Errors
    /// - Invalid configuration (zero limit, zero retention, bad base name)
    /// - Log directory cannot be created
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> Result<Self, ContractError> {
        validate(&config)?;
        fs::create_dir_all(&config.directory)?;

        let sink = Self {
            name: name.into(),
            layout: LogLayout::new(config.directory, config.base_name),
            size_limit: config.size_limit_bytes,
            retention_count: config.retention_count,
            write_lock: Mutex::new(()),
        };

        if config.rotate_on_open {
            if let Err(e) = sink.rotate() {
                warn!(sink = %sink.name, error = %e, "Rotation on open failed");
            }
        }

        debug!(
            sink = %sink.name,
            path = %sink.current_path().display(),
            "RotatingFileSink opened"
        );
        Ok(sink)
    }

    /// Path of the file the next entry is appended to
    pub fn current_path(&self) -> PathBuf {
        self.layout.active_path()
    }

    /// Directory holding the active and rotated files
    pub fn directory(&self) -> PathBuf {
        self.layout.directory().to_path_buf()
    }

    fn rotate(&self) -> Result<(), SinkError> {
        let result = rotation::rotate(&self.layout, self.retention_count);
        observability::record_rotation(result.is_ok());
        result.map(|_| ())
    }

    fn needs_rotation(&self, incoming: u64) -> io::Result<bool> {
        match fs::metadata(self.current_path()) {
            Ok(meta) => Ok(meta.len() > 0 && meta.len() + incoming > self.size_limit),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;
        file.write_all(line.as_bytes())
    }
}

fn validate(config: &FileSinkConfig) -> Result<(), ContractError> {
    if config.size_limit_bytes == 0 {
        return Err(ContractError::config_validation(
            "file.size_limit_bytes",
            "must be greater than 0",
        ));
    }
    if config.retention_count == 0 {
        return Err(ContractError::config_validation(
            "file.retention_count",
            "must be at least 1",
        ));
    }
    if config.base_name.is_empty() {
        return Err(ContractError::config_validation(
            "file.base_name",
            "must not be empty",
        ));
    }
    if config.base_name.contains(['/', '\\']) {
        return Err(ContractError::config_validation(
            "file.base_name",
            format!("'{}' must not contain path separators", config.base_name),
        ));
    }
    Ok(())
}

impl LogSink for RotatingFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_deliver",
        skip(self, entry),
        fields(sink = %self.name)
    )]
    fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError> {
        let mut line = entry.format_line();
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(self.layout.directory()).map_err(|e| SinkError::io(&self.name, e))?;

        let rotated = match self.needs_rotation(line.len() as u64) {
            Ok(true) => self.rotate(),
            Ok(false) => Ok(()),
            Err(e) => return Err(SinkError::io(&self.name, e)),
        };

        self.append(&line).map_err(|e| SinkError::io(&self.name, e))?;

        // The entry is on disk; surface a failed rotation so it gets reported
        rotated
    }
}
