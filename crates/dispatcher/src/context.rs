//! LoggingContext - per-component handle onto a logging core
//!
//! Components receive a context at construction instead of looking the core
//! up globally. Messages are prefixed with the context's target.

use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::sync::Arc;

use contracts::Severity;

use crate::dispatcher::LoggingCore;

/// Cheap, cloneable logging handle bound to a target description
#[derive(Clone)]
pub struct LoggingContext {
    core: Arc<LoggingCore>,
    target: Arc<str>,
}

impl fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingContext")
            .field("target", &self.target)
            .finish()
    }
}

impl LoggingContext {
    pub fn new(core: Arc<LoggingCore>, target: impl Display) -> Self {
        Self {
            core,
            target: Arc::from(target.to_string()),
        }
    }

    /// Context for another target on the same core
    pub fn for_target(&self, target: impl Display) -> Self {
        Self::new(Arc::clone(&self.core), target)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn core(&self) -> &Arc<LoggingCore> {
        &self.core
    }

    /// Submit `"<target> - <message>"`
    pub fn log(&self, severity: Severity, message: impl Display) {
        self.core
            .log(severity, format!("{} - {}", self.target, message));
    }

    /// Submit `"<message>: <error>"` followed by the error's source chain
    pub fn log_error(&self, severity: Severity, error: &(dyn Error + 'static), message: impl Display) {
        let mut text = format!("{message}: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(text, "\ncaused by: {cause}");
            source = cause.source();
        }
        self.log(severity, text);
    }

    /// Submit `"<property> set to <value>"`
    pub fn log_set_to(&self, severity: Severity, property: &str, value: impl Display) {
        self.log(severity, format!("{property} set to {value}"));
    }

    /// Like [`LoggingContext::log_set_to`], rendering `None` as `NULL`
    pub fn log_set_to_opt<T: Display>(&self, severity: Severity, property: &str, value: Option<T>) {
        match value {
            Some(value) => self.log_set_to(severity, property, value),
            None => self.log_set_to(severity, property, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inner;

    impl Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("socket closed")
        }
    }

    impl Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection lost")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    fn messages(core: &LoggingCore) -> Vec<String> {
        core.flush();
        core.history()
            .into_iter()
            .map(|r| r.entry.message().to_string())
            .collect()
    }

    #[test]
    fn test_context_prefixes_target() {
        let core = Arc::new(
            LoggingCore::builder()
                .severity_threshold(Severity::Debug)
                .build()
                .unwrap(),
        );
        let context = LoggingContext::new(Arc::clone(&core), "CodecDevice(Id=202002)");

        context.log(Severity::Informational, "Attempting to reconnect (Attempt 1).");
        context.log_set_to(Severity::Debug, "Volume", 42);
        context.log_set_to_opt::<u8>(Severity::Debug, "Input", None);
        context.for_target("Room").log(Severity::Notice, "occupied");

        assert_eq!(
            messages(&core),
            vec![
                "CodecDevice(Id=202002) - Attempting to reconnect (Attempt 1).",
                "CodecDevice(Id=202002) - Volume set to 42",
                "CodecDevice(Id=202002) - Input set to NULL",
                "Room - occupied",
            ]
        );
    }

    #[test]
    fn test_log_error_includes_source_chain() {
        let core = Arc::new(LoggingCore::new().unwrap());
        let context = LoggingContext::new(Arc::clone(&core), "Link");

        context.log_error(Severity::Error, &Outer(Inner), "Failed to send");

        assert_eq!(
            messages(&core),
            vec!["Link - Failed to send: connection lost\ncaused by: socket closed"]
        );
    }
}
