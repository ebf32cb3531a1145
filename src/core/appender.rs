//! Appender trait for log output destinations

use super::{error::Result, log_event::LogEvent, log_level::LogLevel};
use std::collections::HashMap;
use std::sync::Arc;

/// Parameters handed to an appender constructor, straight from its config section.
pub type AppenderParams = HashMap<String, String>;

/// Builds an appender instance from `(id, params)`.
///
/// Registered under a type name with the logger factory; configuration refers
/// to the type name in each appender's `type` attribute.
pub type AppenderConstructor =
    Arc<dyn Fn(&str, &AppenderParams) -> Result<Arc<dyn Appender>> + Send + Sync>;

/// A named sink shared by every logger bound to it.
///
/// Appenders are singletons by id, so all methods take `&self` and
/// implementations guard their own mutable state.
pub trait Appender: Send + Sync {
    fn id(&self) -> &str;

    fn threshold(&self) -> LogLevel;

    fn set_threshold(&self, threshold: LogLevel);

    /// Render and write `event` if it passes this appender's threshold.
    ///
    /// The check is repeated here even though the calling logger already
    /// filtered: an appender shared by several loggers keeps its own floor.
    fn fire(&self, event: &LogEvent) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn accepts(&self, level: LogLevel) -> bool {
        !level.is_sentinel() && level.passes(self.threshold())
    }
}

/// Read the optional `threshold` parameter.
///
/// Absent or unrecognized values fall back to [`LogLevel::All`].
pub fn threshold_param(params: &AppenderParams) -> LogLevel {
    params
        .get("threshold")
        .and_then(|name| LogLevel::by_name(name.trim()).ok())
        .unwrap_or(LogLevel::All)
}
