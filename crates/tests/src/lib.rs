//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置加载 -> LoggingCore 构建
//! - 多生产者并发提交与 sink 故障隔离
//! - 文件轮转与活动上下文

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use contracts::{LogEntry, LogSink, SinkError};
    use dispatcher::ErrorReporter;

    /// Sink that keeps every delivered entry
    pub struct CollectingSink {
        name: String,
        entries: Mutex<Vec<LogEntry>>,
    }

    impl CollectingSink {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                entries: Mutex::new(Vec::new()),
            }
        }

        pub fn messages(&self) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.message().to_string())
                .collect()
        }
    }

    impl LogSink for CollectingSink {
        fn name(&self) -> &str {
            &self.name
        }

        fn deliver(&self, entry: &LogEntry) -> Result<(), SinkError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    /// Sink that fails every delivery and counts attempts
    pub struct FailingSink {
        pub attempts: AtomicUsize,
    }

    impl FailingSink {
        pub fn new() -> Self {
            Self {
                attempts: AtomicUsize::new(0),
            }
        }

        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    /// Reporter that keeps `(sink, error)` pairs
    #[derive(Default)]
    pub struct CapturingReporter {
        failures: Mutex<Vec<(String, String)>>,
        rotation_failures: AtomicUsize,
    }

    impl CapturingReporter {
        pub fn failures(&self) -> Vec<(String, String)> {
            self.failures.lock().unwrap().clone()
        }

        pub fn rotation_failures(&self) -> usize {
            self.rotation_failures.load(Ordering::SeqCst)
        }
    }

    impl ErrorReporter for CapturingReporter {
        fn report_sink_failure(&self, sink_name: &str, error: &SinkError) {
            if matches!(error, SinkError::Rotation { .. }) {
                self.rotation_failures.fetch_add(1, Ordering::SeqCst);
            }
            self.failures
                .lock()
                .unwrap()
                .push((sink_name.to_string(), error.to_string()));
        }

        fn report_notice(&self, _message: &str) {}
    }

    impl LogSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        fn deliver(&self, _entry: &LogEntry) -> Result<(), SinkError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(SinkError::write("failing", "device unavailable"))
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{FileSinkConfig, LogEntry, Severity};
    use dispatcher::{
        create_core, CoreEvent, FeedbackSink, LoggingContext, LoggingCore, RotatingFileSink,
    };
    use tempfile::tempdir;

    use crate::support::{CapturingReporter, CollectingSink, FailingSink};

    /// End-to-end test: many producers -> LoggingCore -> sinks
    ///
    /// 验证：
    /// 1. 每个被接受的条目恰好送达每个 sink 一次
    /// 2. 同一生产者的条目保持提交顺序
    #[test]
    fn test_concurrent_producers_deliver_everything_once() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 250;

        let core = Arc::new(LoggingCore::new().unwrap());
        let first = Arc::new(CollectingSink::new("first"));
        let second = Arc::new(CollectingSink::new("second"));
        core.add_sink(first.clone());
        core.add_sink(second.clone());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let core = core.clone();
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        core.log(Severity::Error, format!("{p}:{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        core.flush();

        let messages = first.messages();
        assert_eq!(messages.len(), PRODUCERS * PER_PRODUCER);
        // Same global order on every sink
        assert_eq!(second.messages(), messages);

        let mut next: HashMap<usize, usize> = HashMap::new();
        for message in &messages {
            let (p, i) = message.split_once(':').unwrap();
            let (p, i): (usize, usize) = (p.parse().unwrap(), i.parse().unwrap());
            let expected = next.entry(p).or_insert(0);
            assert_eq!(i, *expected, "producer {p} out of order");
            *expected += 1;
        }
        assert!(next.values().all(|&count| count == PER_PRODUCER));

        let metrics = core.metrics();
        assert_eq!(metrics.accepted, (PRODUCERS * PER_PRODUCER) as u64);
        assert_eq!(metrics.queue_len, 0);
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let core = LoggingCore::new().unwrap();
        let failing = Arc::new(FailingSink::new());
        let healthy = Arc::new(CollectingSink::new("healthy"));
        core.add_sink(failing.clone());
        core.add_sink(healthy.clone());

        for i in 0..20 {
            core.log(Severity::Warning, format!("entry {i}"));
        }
        core.flush();

        assert_eq!(failing.attempts(), 20);
        assert_eq!(healthy.messages().len(), 20);
        assert_eq!(core.metrics().sink_failures, 20);
        assert_eq!(core.history().len(), 20);
    }

    #[test]
    fn test_history_keeps_latest_entries() {
        let core = LoggingCore::builder().history_capacity(5).build().unwrap();
        core.add_sink(Arc::new(CollectingSink::new("collect")));

        for i in 0..12 {
            core.log(Severity::Error, format!("m{i}"));
        }
        core.flush();

        let history = core.history();
        let messages: Vec<_> = history.iter().map(|r| r.entry.message().to_string()).collect();
        assert_eq!(messages, vec!["m7", "m8", "m9", "m10", "m11"]);
        assert!(history.windows(2).all(|w| w[1].sequence == w[0].sequence + 1));
    }

    #[test]
    fn test_threshold_change_applies_to_later_entries() {
        let core = LoggingCore::builder()
            .severity_threshold(Severity::Error)
            .build()
            .unwrap();
        let sink = Arc::new(CollectingSink::new("collect"));
        core.add_sink(sink.clone());

        core.log(Severity::Informational, "dropped");
        core.set_severity_threshold(Severity::Debug);
        core.log(Severity::Debug, "kept");
        core.flush();

        assert_eq!(sink.messages(), vec!["kept"]);
        assert_eq!(core.metrics().filtered, 1);
    }

    #[test]
    fn test_config_to_core_with_rotating_file() {
        let dir = tempdir().unwrap();
        let content = format!(
            r#"
severity_threshold = "debug"
history_capacity = 10

[console]
enabled = false

[file]
directory = "{}"
base_name = "controller"
size_limit_bytes = 300
retention_count = 3
"#,
            dir.path().display().to_string().replace('\\', "/")
        );
        let config = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();
        let core = create_core(&config).unwrap();
        assert_eq!(core.sink_count(), 1);
        assert_eq!(core.history_capacity(), 10);

        for i in 0..100 {
            core.log(Severity::Notice, format!("rotating line {i:03}"));
        }
        core.shutdown();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["controller.log", "controller_00.log", "controller_01.log"]
        );

        let active = std::fs::read_to_string(dir.path().join("controller.log")).unwrap();
        assert!(active.len() <= 300);
        assert!(active.contains("rotating line 099"));
        assert!(active.starts_with("Notice | "));
    }

    #[test]
    fn test_rotation_failure_reported_not_raised() {
        let dir = tempdir().unwrap();
        let entry_len = LogEntry::new(Severity::Error, "first").format_line().len() as u64 + 1;
        let file_sink = RotatingFileSink::new(
            "file",
            FileSinkConfig {
                directory: dir.path().to_path_buf(),
                base_name: "app".to_string(),
                size_limit_bytes: entry_len,
                retention_count: 4,
                rotate_on_open: false,
            },
        )
        .unwrap();

        let reporter = Arc::new(CapturingReporter::default());
        let healthy = Arc::new(CollectingSink::new("healthy"));
        let core = LoggingCore::builder()
            .error_reporter(reporter.clone())
            .sink(Arc::new(file_sink))
            .sink(healthy.clone())
            .build()
            .unwrap();

        core.log(Severity::Error, "first");
        core.log(Severity::Error, "secnd");
        core.flush();

        let blocker = dir.path().join("app_01.log");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("x"), "occupied").unwrap();

        core.log(Severity::Error, "third");
        core.log(Severity::Error, "forth");
        core.flush();

        assert_eq!(reporter.rotation_failures(), 2);
        assert!(reporter.failures().iter().all(|(sink, _)| sink == "file"));
        assert_eq!(core.metrics().sink_failures, 2);

        let active = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(active.contains("third"));
        assert!(active.contains("forth"));
        assert_eq!(healthy.messages(), vec!["first", "secnd", "third", "forth"]);
        assert_eq!(core.history().len(), 4);
    }

    #[tokio::test]
    async fn test_feedback_sink_and_core_events() {
        let core = LoggingCore::new().unwrap();
        let feedback = Arc::new(FeedbackSink::new("feedback", 16));
        let mut feedback_rx = feedback.subscribe();
        let mut events = core.subscribe();
        core.add_sink(feedback.clone());

        let context = LoggingContext::new(Arc::new(core), "Motor");
        context.log_set_to(Severity::Notice, "Speed", 1200);
        context.core().flush_async().await;

        let entry = feedback_rx.recv().await.unwrap();
        assert!(entry.message().contains("Speed"));
        assert!(entry.message().contains("1200"));

        match events.recv().await.unwrap() {
            CoreEvent::EntryAdded(added) => assert_eq!(added, entry),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_empty_sink_set_still_records_history() {
        let core = LoggingCore::new().unwrap();
        core.log(Severity::Critical, "nobody listening");
        core.flush();

        assert_eq!(core.history().len(), 1);
        assert_eq!(core.metrics().empty_sink_notices, 1);
    }
}

#[cfg(test)]
mod activity_tests {
    use std::sync::Arc;
    use std::thread;

    use activity::{Activity, ActivityContext, Priority};
    use contracts::Severity;

    #[test]
    fn test_most_pressing_follows_priority() {
        let context = ActivityContext::new();
        context.log_activity(Activity::new(Priority::Low, "idle", "Waiting", Severity::Informational));
        context.log_activity(Activity::new(Priority::Urgent, "estop", "Emergency stop", Severity::Alert));
        context.log_activity(Activity::new(Priority::Medium, "door", "Door open", Severity::Warning));

        let keys: Vec<_> = context
            .activities()
            .iter()
            .map(|a| a.key().to_string())
            .collect();
        assert_eq!(keys, vec!["estop", "door", "idle"]);
        assert_eq!(context.most_pressing().unwrap().key(), "estop");
    }

    #[tokio::test]
    async fn test_repeated_activity_notifies_once() {
        let context = ActivityContext::new();
        let mut rx = context.subscribe();

        let fault = || Activity::new(Priority::High, "fault", "Overcurrent", Severity::Error);
        assert!(context.log_activity(fault()));
        assert!(!context.log_activity(fault()));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.key(), "fault");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_concurrent_writers_last_value_per_key() {
        let context = Arc::new(ActivityContext::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let context = context.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        context.log_activity(Activity::new(
                            Priority::Default,
                            format!("worker-{t}"),
                            format!("step {i}"),
                            Severity::Informational,
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(context.len(), 4);
        for t in 0..4 {
            assert_eq!(context.get(&format!("worker-{t}")).unwrap().message(), "step 99");
        }
    }
}
