//! 配置校验模块
//!
//! 校验规则：
//! - history_capacity > 0
//! - event_capacity > 0
//! - file.size_limit_bytes > 0
//! - file.retention_count >= 1
//! - file.base_name 非空且不含路径分隔符
//! - event_log.source 非空

use contracts::{ContractError, LoggingConfig};

/// 校验 LoggingConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &LoggingConfig) -> Result<(), ContractError> {
    validate_capacities(config)?;
    validate_file_sink(config)?;
    validate_event_log(config)?;
    Ok(())
}

/// 校验容量
fn validate_capacities(config: &LoggingConfig) -> Result<(), ContractError> {
    if config.history_capacity == 0 {
        return Err(ContractError::config_validation(
            "history_capacity",
            "history_capacity must be > 0",
        ));
    }
    if config.event_capacity == 0 {
        return Err(ContractError::config_validation(
            "event_capacity",
            "event_capacity must be > 0",
        ));
    }
    Ok(())
}

/// 校验文件 sink
fn validate_file_sink(config: &LoggingConfig) -> Result<(), ContractError> {
    let Some(file) = &config.file else {
        return Ok(());
    };

    if file.size_limit_bytes == 0 {
        return Err(ContractError::config_validation(
            "file.size_limit_bytes",
            "size_limit_bytes must be > 0",
        ));
    }
    if file.retention_count == 0 {
        return Err(ContractError::config_validation(
            "file.retention_count",
            "retention_count must be >= 1",
        ));
    }
    if file.base_name.is_empty() {
        return Err(ContractError::config_validation(
            "file.base_name",
            "base_name cannot be empty",
        ));
    }
    if file.base_name.contains(['/', '\\']) {
        return Err(ContractError::config_validation(
            "file.base_name",
            format!("base_name '{}' cannot contain path separators", file.base_name),
        ));
    }
    Ok(())
}

/// 校验事件日志 sink
fn validate_event_log(config: &LoggingConfig) -> Result<(), ContractError> {
    if let Some(event_log) = &config.event_log {
        if event_log.source.trim().is_empty() {
            return Err(ContractError::config_validation(
                "event_log.source",
                "source cannot be empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{EventLogConfig, FileSinkConfig};

    fn full_config() -> LoggingConfig {
        LoggingConfig {
            file: Some(FileSinkConfig::default()),
            event_log: Some(EventLogConfig {
                source: "Controller".into(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&LoggingConfig::default()).is_ok());
        assert!(validate(&full_config()).is_ok());
    }

    #[test]
    fn test_zero_history_capacity() {
        let mut config = full_config();
        config.history_capacity = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("history_capacity must be > 0"), "got: {err}");
    }

    #[test]
    fn test_zero_retention() {
        let mut config = full_config();
        if let Some(file) = config.file.as_mut() {
            file.retention_count = 0;
        }
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("file.retention_count"), "got: {err}");
    }

    #[test]
    fn test_zero_size_limit() {
        let mut config = full_config();
        if let Some(file) = config.file.as_mut() {
            file.size_limit_bytes = 0;
        }
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("size_limit_bytes must be > 0"), "got: {err}");
    }

    #[test]
    fn test_base_name_with_separator() {
        let mut config = full_config();
        if let Some(file) = config.file.as_mut() {
            file.base_name = "logs/app".into();
        }
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("path separators"), "got: {err}");
    }

    #[test]
    fn test_empty_event_source() {
        let mut config = full_config();
        config.event_log = Some(EventLogConfig { source: " ".into() });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }
}
