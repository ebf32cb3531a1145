//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration source could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// No level carries this name
    #[error("Unknown log level name '{name}'")]
    UnknownLevel { name: String },

    /// No level carries this rank
    #[error("Unknown log level rank {rank}")]
    UnknownLevelRank { rank: i64 },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Configured appender refers to a type nobody registered
    #[error("Unknown appender type '{kind}' for appender '{appender}'; register the type before the first logger lookup")]
    UnknownAppenderType { kind: String, appender: String },

    /// Appender type registered twice
    #[error("Appender type '{0}' is already registered")]
    DuplicateAppenderType(String),

    /// Appender instance registered twice
    #[error("Appender '{0}' is already registered")]
    DuplicateAppender(String),

    /// Appender constructor failed
    #[error("Failed to construct appender '{id}': {source}")]
    AppenderConstruction {
        id: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn unknown_appender_type(kind: impl Into<String>, appender: impl Into<String>) -> Self {
        LoggerError::UnknownAppenderType {
            kind: kind.into(),
            appender: appender.into(),
        }
    }

    pub fn appender_construction(id: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::AppenderConstruction {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("appender", "missing type");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_appender("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::appender_construction("file", LoggerError::other("boom"));
        assert!(matches!(err, LoggerError::AppenderConstruction { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unknown_level("LOUD");
        assert_eq!(err.to_string(), "Unknown log level name 'LOUD'");

        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::DuplicateAppender("std".to_string());
        assert_eq!(err.to_string(), "Appender 'std' is already registered");

        let err = LoggerError::unknown_appender_type("kafka", "events");
        assert!(err.to_string().starts_with("Unknown appender type 'kafka' for appender 'events'"));
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }

    #[test]
    fn test_construction_error_keeps_source() {
        use std::error::Error;

        let err = LoggerError::appender_construction(
            "file",
            LoggerError::config("file", "path is required"),
        );
        let source = err.source().expect("source is kept");
        assert!(source.to_string().contains("path is required"));
    }
}
