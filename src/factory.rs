//! Logger registry and factory
//!
//! A [`LoggerFactory`] owns four pieces of state:
//!
//! - the appender *type* table (type name → constructor),
//! - the appender *instance* table (id → appender, at most one per id),
//! - the logger cache (namespace → logger),
//! - a one-shot latch guarding configuration load and appender creation.
//!
//! The first [`try_get_logger`](LoggerFactory::try_get_logger) call loads the
//! configuration and builds every configured appender; concurrent first
//! callers block until that finishes and never run it twice.

use crate::appenders::{
    ConsoleAppender, DailyRollingFileAppender, CONSOLE_APPENDER_TYPE, DAILY_FILE_APPENDER_TYPE,
};
use crate::core::{
    Appender, AppenderConfig, AppenderConstructor, AppenderParams, LogConfig, LogSettings, Logger,
    LoggerError, Result,
};
use crate::source::{ConfigSource, FileSource};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Id of the console appender every factory creates up front.
pub const STD_APPENDER: &str = "std";

pub struct LoggerFactory {
    source: Box<dyn ConfigSource>,
    appender_types: RwLock<HashMap<String, AppenderConstructor>>,
    appenders: Mutex<HashMap<String, Arc<dyn Appender>>>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    settings: OnceCell<LogSettings>,
}

impl LoggerFactory {
    /// Create a factory reading its configuration from `source`.
    ///
    /// The `std` and `file` appender types are registered and the `std`
    /// console appender instance exists immediately; nothing is loaded
    /// from `source` until the first logger lookup.
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        let mut appender_types: HashMap<String, AppenderConstructor> = HashMap::new();
        appender_types.insert(
            CONSOLE_APPENDER_TYPE.to_string(),
            Arc::new(ConsoleAppender::from_params),
        );
        appender_types.insert(
            DAILY_FILE_APPENDER_TYPE.to_string(),
            Arc::new(DailyRollingFileAppender::from_params),
        );

        let mut appenders: HashMap<String, Arc<dyn Appender>> = HashMap::new();
        appenders.insert(
            STD_APPENDER.to_string(),
            Arc::new(ConsoleAppender::new(STD_APPENDER)),
        );

        Self {
            source: Box::new(source),
            appender_types: RwLock::new(appender_types),
            appenders: Mutex::new(appenders),
            loggers: Mutex::new(HashMap::new()),
            settings: OnceCell::new(),
        }
    }

    /// Register a named appender constructor.
    ///
    /// Must happen before the first logger lookup for configuration to be
    /// able to refer to `kind`.
    ///
    /// # Errors
    ///
    /// [`LoggerError::DuplicateAppenderType`] if `kind` is already registered.
    pub fn register_appender_type<F>(&self, kind: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&str, &AppenderParams) -> Result<Arc<dyn Appender>> + Send + Sync + 'static,
    {
        let kind = kind.into();
        let mut types = self.appender_types.write();
        if types.contains_key(&kind) {
            return Err(LoggerError::DuplicateAppenderType(kind));
        }
        types.insert(kind, Arc::new(constructor));
        Ok(())
    }

    pub fn has_appender_type(&self, kind: &str) -> bool {
        self.appender_types.read().contains_key(kind)
    }

    /// Add freshly built appenders under their configured ids.
    ///
    /// Either every instance is registered or none is.
    fn register_appender_instances(&self, built: Vec<(String, Arc<dyn Appender>)>) -> Result<()> {
        let mut appenders = self.appenders.lock();
        if let Some((id, _)) = built.iter().find(|(id, _)| appenders.contains_key(id)) {
            return Err(LoggerError::DuplicateAppender(id.clone()));
        }
        appenders.extend(built);
        Ok(())
    }

    /// Look up a registered appender instance.
    pub fn appender(&self, id: &str) -> Option<Arc<dyn Appender>> {
        self.appenders.lock().get(id).cloned()
    }

    /// Registered appender ids, sorted.
    pub fn appender_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.appenders.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.get().is_some()
    }

    /// Parsed configuration, once initialization has run.
    pub fn settings(&self) -> Option<&LogSettings> {
        self.settings.get()
    }

    /// Return the logger for `namespace`, initializing the factory on first use.
    ///
    /// Repeated lookups of the same namespace return the same logger.
    ///
    /// # Errors
    ///
    /// Any configuration or appender construction failure during the
    /// one-time initialization.
    pub fn try_get_logger(&self, namespace: &str) -> Result<Arc<Logger>> {
        let settings = self.settings.get_or_try_init(|| self.initialize())?;

        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(namespace) {
            return Ok(Arc::clone(logger));
        }

        let config = settings.resolve(namespace);
        let logger = Arc::new(self.create_logger(namespace, &config));
        loggers.insert(namespace.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    /// Like [`try_get_logger`](Self::try_get_logger), treating failure as fatal.
    ///
    /// # Panics
    ///
    /// Panics if the one-time initialization fails: startup has no degraded mode.
    pub fn get_logger(&self, namespace: &str) -> Arc<Logger> {
        self.try_get_logger(namespace)
            .unwrap_or_else(|e| panic!("logger initialization failed: {}", e))
    }

    fn initialize(&self) -> Result<LogSettings> {
        let props = self.source.load()?;
        let settings = LogSettings::from_properties(&props)?;

        // Nothing is shared until every constructor has succeeded
        let built = settings
            .appenders()
            .map(|config| Ok((config.id.clone(), self.create_appender(config)?)))
            .collect::<Result<Vec<_>>>()?;
        self.register_appender_instances(built)?;

        Ok(settings)
    }

    fn create_appender(&self, config: &AppenderConfig) -> Result<Arc<dyn Appender>> {
        let constructor = self
            .appender_types
            .read()
            .get(&config.kind)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_appender_type(&config.kind, &config.id))?;

        constructor(&config.id, &config.params)
            .map_err(|e| LoggerError::appender_construction(&config.id, e))
    }

    fn create_logger(&self, namespace: &str, config: &LogConfig) -> Logger {
        let logger = Logger::new(namespace, config.level);
        let appenders = self.appenders.lock();

        for id in &config.appenders {
            match appenders.get(id) {
                Some(appender) => logger.add_appender(id.as_str(), Arc::clone(appender)),
                None => eprintln!(
                    "[WARN] Appender '{}' not found for logger '{}'; skipping",
                    id, namespace
                ),
            }
        }

        logger
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new(FileSource::from_env())
    }
}

static GLOBAL_FACTORY: Lazy<LoggerFactory> = Lazy::new(LoggerFactory::default);

/// The process-wide factory, configured from `$LOG4R_CONFIG` or `log4r.toml`.
pub fn global() -> &'static LoggerFactory {
    &GLOBAL_FACTORY
}

/// Logger for `namespace` from the process-wide factory.
///
/// # Panics
///
/// Panics if loading the configuration or building its appenders fails.
pub fn get_logger(namespace: &str) -> Arc<Logger> {
    global().get_logger(namespace)
}

/// Register an appender type with the process-wide factory.
///
/// # Panics
///
/// Panics if `kind` is already registered.
pub fn register_appender_type<F>(kind: impl Into<String>, constructor: F)
where
    F: Fn(&str, &AppenderParams) -> Result<Arc<dyn Appender>> + Send + Sync + 'static,
{
    if let Err(e) = global().register_appender_type(kind, constructor) {
        panic!("{}", e);
    }
}
