//! Log event structure and its line rendering

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// strftime pattern for the event timestamp: `Jan 02 15:04:05`.
pub const TIMESTAMP_FORMAT: &str = "%b %d %H:%M:%S";

/// One emission, built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    logger_id: String,
    level: LogLevel,
    timestamp: DateTime<Local>,
    message: String,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so every accepted event renders as exactly one line.
    fn sanitize_message(message: &str) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message.to_string();
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(logger_id: impl Into<String>, level: LogLevel, message: impl AsRef<str>) -> Self {
        Self::at(logger_id, level, message, Local::now())
    }

    /// Build an event with an explicit timestamp.
    pub fn at(
        logger_id: impl Into<String>,
        level: LogLevel,
        message: impl AsRef<str>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            logger_id: logger_id.into(),
            level,
            timestamp,
            message: Self::sanitize_message(message.as_ref()),
        }
    }

    pub fn logger_id(&self) -> &str {
        &self.logger_id
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render as `<Mon DD HH:MM:SS> <LEVEL> <logger-id>: <message>`.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with_level(self.level.to_str())
    }

    /// Same layout as [`render`](Self::render) with a caller-supplied level label,
    /// used by the console appender to colour the level name.
    pub(crate) fn render_with_level(&self, level: &str) -> String {
        format!(
            "{} {} {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            level,
            self.logger_id,
            self.message
        )
    }
}
