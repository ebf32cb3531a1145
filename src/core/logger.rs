//! Per-namespace logger handle

use super::{
    appender::Appender,
    error::Result,
    log_event::LogEvent,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A named logger with its own threshold and a set of bound appenders.
///
/// Loggers are handed out by the [`LoggerFactory`](crate::LoggerFactory) and
/// cached per namespace string. Appenders are shared: two loggers bound to
/// the same appender id write through the same instance.
pub struct Logger {
    id: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<BTreeMap<String, Arc<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(id: impl Into<String>, level: LogLevel) -> Self {
        Self {
            id: id.into(),
            level: RwLock::new(level),
            appenders: RwLock::new(BTreeMap::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Bind `appender` under `key`, replacing any appender already bound there.
    pub fn add_appender(&self, key: impl Into<String>, appender: Arc<dyn Appender>) {
        self.appenders.write().insert(key.into(), appender);
    }

    pub fn remove_appender(&self, key: &str) -> Option<Arc<dyn Appender>> {
        self.appenders.write().remove(key)
    }

    /// Snapshot of the bound appenders, keyed by binding id.
    pub fn appenders(&self) -> BTreeMap<String, Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_ids(&self) -> Vec<String> {
        self.appenders.read().keys().cloned().collect()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// True when an event at `level` would be emitted. Always false for `ALL` and `OFF`.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        !level.is_sentinel() && level.passes(self.level())
    }

    pub fn is_trace(&self) -> bool {
        self.is_enabled(LogLevel::Trace)
    }

    pub fn is_debug(&self) -> bool {
        self.is_enabled(LogLevel::Debug)
    }

    pub fn is_info(&self) -> bool {
        self.is_enabled(LogLevel::Info)
    }

    pub fn is_warn(&self) -> bool {
        self.is_enabled(LogLevel::Warn)
    }

    pub fn is_error(&self) -> bool {
        self.is_enabled(LogLevel::Error)
    }

    pub fn is_fatal(&self) -> bool {
        self.is_enabled(LogLevel::Fatal)
    }

    /// Emit `message` at `level` if this logger's threshold allows it.
    ///
    /// Nothing is built and no appender is touched when the level is below
    /// the logger's threshold.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let event = LogEvent::new(self.id.as_str(), level, message);
        self.dispatch(&event);
    }

    /// Emit pre-formatted arguments; formatting happens only after the level check.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let event = LogEvent::new(self.id.as_str(), level, args.to_string());
        self.dispatch(&event);
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message)
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message)
    }

    /// Flush every bound appender, returning the first error.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self.snapshot() {
            if let Err(e) = appender.flush() {
                eprintln!("[LOGGER ERROR] Appender '{}' flush failed: {}", appender.id(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn snapshot(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().values().cloned().collect()
    }

    /// Fire `event` at every bound appender.
    ///
    /// **Per-Appender Panic Isolation**: each appender call is wrapped in
    /// catch_unwind so one failing appender cannot starve the others.
    fn dispatch(&self, event: &LogEvent) {
        self.metrics.record_emitted();

        for appender in self.snapshot() {
            let fire_result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.fire(event)));

            match fire_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.metrics.record_appender_failure();
                    eprintln!(
                        "[LOGGER ERROR] Appender '{}' failed for logger '{}': {}",
                        appender.id(),
                        self.id,
                        e
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_appender_failure();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.id(),
                        panic_msg
                    );
                }
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("level", &self.level())
            .field("appenders", &self.appender_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use parking_lot::Mutex;

    struct RecordingAppender {
        id: String,
        threshold: RwLock<LogLevel>,
        events: Mutex<Vec<LogEvent>>,
    }

    impl RecordingAppender {
        fn new(id: &str, threshold: LogLevel) -> Arc<Self> {
            Arc::new(Self {
                id: id.to_string(),
                threshold: RwLock::new(threshold),
                events: Mutex::new(Vec::new()),
            })
        }

        fn messages(&self) -> Vec<String> {
            self.events.lock().iter().map(|e| e.message().to_string()).collect()
        }
    }

    impl Appender for RecordingAppender {
        fn id(&self) -> &str {
            &self.id
        }

        fn threshold(&self) -> LogLevel {
            *self.threshold.read()
        }

        fn set_threshold(&self, threshold: LogLevel) {
            *self.threshold.write() = threshold;
        }

        fn fire(&self, event: &LogEvent) -> Result<()> {
            if self.accepts(event.level()) {
                self.events.lock().push(event.clone());
            }
            Ok(())
        }
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn id(&self) -> &str {
            "failing"
        }

        fn threshold(&self) -> LogLevel {
            LogLevel::All
        }

        fn set_threshold(&self, _threshold: LogLevel) {}

        fn fire(&self, _event: &LogEvent) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn id(&self) -> &str {
            "panicking"
        }

        fn threshold(&self) -> LogLevel {
            LogLevel::All
        }

        fn set_threshold(&self, _threshold: LogLevel) {}

        fn fire(&self, _event: &LogEvent) -> Result<()> {
            panic!("appender exploded");
        }
    }

    #[test]
    fn test_level_gating() {
        let logger = Logger::new("svc", LogLevel::Warn);
        let sink = RecordingAppender::new("sink", LogLevel::All);
        logger.add_appender("sink", sink.clone());

        logger.trace("trace");
        logger.debug("debug");
        logger.info("info");
        logger.warn("warn");
        logger.error("error");
        logger.fatal("fatal");

        assert_eq!(sink.messages(), vec!["warn", "error", "fatal"]);
        assert_eq!(logger.metrics().emitted_count(), 3);
        assert_eq!(logger.metrics().suppressed_count(), 3);
    }

    #[test]
    fn test_predicates() {
        let logger = Logger::new("svc", LogLevel::Info);
        assert!(!logger.is_trace());
        assert!(!logger.is_debug());
        assert!(logger.is_info());
        assert!(logger.is_warn());
        assert!(logger.is_error());
        assert!(logger.is_fatal());

        logger.set_level(LogLevel::Off);
        assert!(!logger.is_fatal());

        logger.set_level(LogLevel::All);
        assert!(logger.is_trace());
        assert_eq!(logger.level(), LogLevel::All);
    }

    #[test]
    fn test_appender_threshold_filters_independently() {
        let logger = Logger::new("svc", LogLevel::Trace);
        let everything = RecordingAppender::new("everything", LogLevel::All);
        let errors = RecordingAppender::new("errors", LogLevel::Error);
        logger.add_appender("everything", everything.clone());
        logger.add_appender("errors", errors.clone());

        logger.debug("details");
        logger.error("broken");

        assert_eq!(everything.messages(), vec!["details", "broken"]);
        assert_eq!(errors.messages(), vec!["broken"]);
    }

    #[test]
    fn test_event_carries_logger_id() {
        let logger = Logger::new("a/b/c", LogLevel::All);
        let sink = RecordingAppender::new("sink", LogLevel::All);
        logger.add_appender("sink", sink.clone());

        logger.info("hello");

        let events = sink.events.lock();
        assert_eq!(events[0].logger_id(), "a/b/c");
        assert_eq!(events[0].level(), LogLevel::Info);
    }

    #[test]
    fn test_add_and_remove_appender() {
        let logger = Logger::new("svc", LogLevel::All);
        logger.add_appender("one", RecordingAppender::new("one", LogLevel::All));
        logger.add_appender("two", RecordingAppender::new("two", LogLevel::All));
        assert_eq!(logger.appender_ids(), vec!["one", "two"]);

        let snapshot = logger.appenders();
        assert!(logger.remove_appender("one").is_some());
        assert!(logger.remove_appender("one").is_none());

        // The snapshot taken before removal is unaffected.
        assert_eq!(snapshot.len(), 2);
        assert_eq!(logger.appender_ids(), vec!["two"]);
    }

    #[test]
    fn test_failing_and_panicking_appenders_are_isolated() {
        let logger = Logger::new("svc", LogLevel::All);
        let sink = RecordingAppender::new("sink", LogLevel::All);
        logger.add_appender("a_failing", Arc::new(FailingAppender));
        logger.add_appender("b_panicking", Arc::new(PanickingAppender));
        logger.add_appender("c_sink", sink.clone());

        logger.info("still delivered");

        assert_eq!(sink.messages(), vec!["still delivered"]);
        assert_eq!(logger.metrics().appender_failure_count(), 2);
    }

    #[test]
    fn test_sentinel_levels_never_emit() {
        let logger = Logger::new("svc", LogLevel::Off);
        let sink = RecordingAppender::new("sink", LogLevel::Off);
        logger.add_appender("sink", sink.clone());

        logger.log(LogLevel::Off, "never an event");
        logger.log_fmt(LogLevel::Off, format_args!("nor {}", "this"));
        assert!(!logger.is_enabled(LogLevel::Off));

        logger.set_level(LogLevel::All);
        sink.set_threshold(LogLevel::All);
        logger.log(LogLevel::All, "not a real level");
        assert!(!logger.is_enabled(LogLevel::All));
        assert!(!sink.accepts(LogLevel::All));
        assert!(!sink.accepts(LogLevel::Off));

        assert!(sink.messages().is_empty());
        assert_eq!(logger.metrics().emitted_count(), 0);
        assert_eq!(logger.metrics().suppressed_count(), 3);
    }

    #[test]
    fn test_log_fmt_formats_after_check() {
        let logger = Logger::new("svc", LogLevel::Info);
        let sink = RecordingAppender::new("sink", LogLevel::All);
        logger.add_appender("sink", sink.clone());

        logger.log_fmt(LogLevel::Debug, format_args!("hidden {}", 1));
        logger.log_fmt(LogLevel::Info, format_args!("port {}", 8080));

        assert_eq!(sink.messages(), vec!["port 8080"]);
    }
}
