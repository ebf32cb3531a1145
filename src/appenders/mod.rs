//! Appender implementations

pub mod console;
pub mod daily_file;

pub use console::{ConsoleAppender, CONSOLE_APPENDER_TYPE};
pub use daily_file::{DailyRollingFileAppender, DAILY_FILE_APPENDER_TYPE};

pub use crate::core::Appender;
