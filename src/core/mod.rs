//! Core logger types and traits

pub mod appender;
pub mod clock;
pub mod config;
pub mod error;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;

pub use appender::{threshold_param, Appender, AppenderConstructor, AppenderParams};
pub use clock::{date_stamp, DateSource, ManualDate, SystemDate};
pub use config::{
    AppenderConfig, LogConfig, LogSettings, ManagementConfig, Properties, APPENDER_SECTION,
    DEFAULT_MANAGEMENT_PORT, LOGGER_SECTION, MANAGEMENT_SECTION, ROOT_LOGGER,
};
pub use error::{LoggerError, Result};
pub use log_event::{LogEvent, TIMESTAMP_FORMAT};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
