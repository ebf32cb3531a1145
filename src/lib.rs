//! # Rust Log4r
//!
//! A hierarchical, configuration-driven logging framework.
//!
//! Loggers are identified by `/`-separated namespaces such as
//! `github.com/acme/api/handlers`. Each namespace resolves to the closest
//! configured ancestor (falling back to `__root__`), which decides the
//! logger's threshold and the appenders it writes through.
//!
//! ## Features
//!
//! - **Hierarchical resolution**: configure a package once, every sub-package inherits it
//! - **Shared appenders**: one instance per appender id, shared by every logger bound to it
//! - **Daily rolling files**: the current file is renamed with a date suffix at day change
//! - **Pluggable appender types**: register a constructor, reference it from config
//!
//! ## Example
//!
//! ```
//! use rust_log4r::prelude::*;
//!
//! let props = Properties::new()
//!     .with("logger", "__root__", "WARN, std")
//!     .with("logger", "app/db", "DEBUG, std");
//! let factory = LoggerFactory::new(props);
//!
//! let logger = factory.get_logger("app/db/pool");
//! assert!(logger.is_debug());
//! assert!(!factory.get_logger("app/web").is_info());
//! ```

pub mod appenders;
pub mod core;
pub mod factory;
pub mod macros;
pub mod source;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, DailyRollingFileAppender};
    pub use crate::core::{
        Appender, AppenderParams, LogEvent, LogLevel, LogSettings, Logger, LoggerError,
        LoggerMetrics, Properties, Result,
    };
    pub use crate::factory::{get_logger, register_appender_type, LoggerFactory};
    pub use crate::source::{ConfigSource, FileSource};
}

pub use appenders::{ConsoleAppender, DailyRollingFileAppender};
pub use core::{
    Appender, AppenderConfig, AppenderParams, LogConfig, LogEvent, LogLevel, LogSettings, Logger,
    LoggerError, LoggerMetrics, ManagementConfig, Properties, Result, ROOT_LOGGER,
};
pub use factory::{get_logger, register_appender_type, LoggerFactory, STD_APPENDER};
pub use source::{ConfigSource, FileSource};
