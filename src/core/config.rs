//! Parsed logging configuration
//!
//! Configuration arrives as a [`Properties`] bag: named sections of string
//! keys and values. Three sections are understood:
//!
//! - `appender`: `<id>.<attribute> = <value>` entries. Every appender needs a
//!   `type` attribute; the remaining attributes become constructor parameters.
//! - `logger`: `<namespace> = <level>[, <appender-id>...]`.
//! - `management`: `port` (1-65535, default 18080) and `service` (boolean,
//!   default true). Carried through untouched for the host application.

use super::appender::AppenderParams;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Namespace of the fallback logger entry.
pub const ROOT_LOGGER: &str = "__root__";

pub const APPENDER_SECTION: &str = "appender";
pub const LOGGER_SECTION: &str = "logger";
pub const MANAGEMENT_SECTION: &str = "management";

pub const DEFAULT_MANAGEMENT_PORT: u16 = 18080;

/// Raw sectioned key/value configuration.
///
/// # Examples
///
/// ```
/// use rust_log4r::core::Properties;
///
/// let props = Properties::new()
///     .with("appender", "app.type", "file")
///     .with("appender", "app.path", "logs/app.log")
///     .with("logger", "__root__", "INFO, std, app");
///
/// assert_eq!(props.get("appender", "app.type"), Some("file"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with(
        mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(section, key, value);
        self
    }

    pub fn set(&mut self, section: impl Into<String>, key: impl Into<String>, value: impl Into<String>) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn section(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// One configured appender instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppenderConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub params: AppenderParams,
}

/// Threshold and appender bindings for one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub id: String,
    pub level: LogLevel,
    pub appenders: Vec<String>,
}

impl LogConfig {
    pub fn new(id: impl Into<String>, level: LogLevel, appenders: Vec<String>) -> Self {
        Self {
            id: id.into(),
            level,
            appenders,
        }
    }

    /// Config handed out when nothing matches, not even `__root__`.
    #[must_use]
    pub fn inert() -> Self {
        Self::new(ROOT_LOGGER, LogLevel::Off, Vec::new())
    }

    fn parse(id: &str, value: &str) -> Result<Self> {
        let mut parts = value.split(',').map(str::trim);
        let level_name = parts.next().unwrap_or_default();
        let level = LogLevel::by_name(level_name).map_err(|_| {
            LoggerError::config(
                LOGGER_SECTION,
                format!(
                    "invalid logger config '{}' = '{}'; expected <level>, <appender>, <appender>...",
                    id, value
                ),
            )
        })?;
        let appenders = parts
            .filter(|appender| !appender.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self::new(id, level, appenders))
    }
}

/// Management service toggle, uninterpreted by the logger core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementConfig {
    pub port: u16,
    pub service: bool,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_MANAGEMENT_PORT,
            service: true,
        }
    }
}

impl ManagementConfig {
    fn parse(section: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = section.get("port") {
            config.port = port
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|port| *port >= 1)
                .ok_or_else(|| {
                    LoggerError::config(
                        MANAGEMENT_SECTION,
                        format!("invalid port '{}'; expected a number in 1-65535", port),
                    )
                })?;
        }

        if let Some(service) = section.get("service") {
            config.service = parse_bool(service).ok_or_else(|| {
                LoggerError::config(
                    MANAGEMENT_SECTION,
                    format!("invalid service flag '{}'; expected true or false", service),
                )
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// The parsed view of a [`Properties`] bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    loggers: HashMap<String, LogConfig>,
    appenders: BTreeMap<String, AppenderConfig>,
    management: Option<ManagementConfig>,
}

impl LogSettings {
    /// Apply the section rules to `props`.
    ///
    /// # Errors
    ///
    /// Fails on an appender key without a `.` separator, an appender without a
    /// `type`, an unrecognized level name, or an invalid management entry.
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(section) = props.section(APPENDER_SECTION) {
            settings.appenders = Self::parse_appenders(section)?;
        }

        if let Some(section) = props.section(LOGGER_SECTION) {
            for (id, value) in section {
                settings.loggers.insert(id.clone(), LogConfig::parse(id, value)?);
            }
        }

        if let Some(section) = props.section(MANAGEMENT_SECTION) {
            settings.management = Some(ManagementConfig::parse(section)?);
        }

        Ok(settings)
    }

    fn parse_appenders(section: &BTreeMap<String, String>) -> Result<BTreeMap<String, AppenderConfig>> {
        let mut attributes: BTreeMap<String, AppenderParams> = BTreeMap::new();

        for (key, value) in section {
            let (id, attribute) = key
                .split_once('.')
                .filter(|(id, attribute)| !id.is_empty() && !attribute.is_empty())
                .ok_or_else(|| {
                    LoggerError::config(
                        APPENDER_SECTION,
                        format!("appender entry '{}' has no attribute; expected <id>.<attribute>", key),
                    )
                })?;
            attributes
                .entry(id.to_string())
                .or_default()
                .insert(attribute.to_string(), value.clone());
        }

        attributes
            .into_iter()
            .map(|(id, mut params)| {
                let kind = params.remove("type").ok_or_else(|| {
                    LoggerError::config(APPENDER_SECTION, format!("no type specified for appender '{}'", id))
                })?;
                let config = AppenderConfig {
                    id: id.clone(),
                    kind: kind.trim().to_string(),
                    params,
                };
                Ok((id, config))
            })
            .collect()
    }

    /// Add or replace the config for one namespace.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_logger(mut self, config: LogConfig) -> Self {
        self.loggers.insert(config.id.clone(), config);
        self
    }

    /// Add or replace one appender config.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_appender(mut self, config: AppenderConfig) -> Self {
        self.appenders.insert(config.id.clone(), config);
        self
    }

    /// Find the config governing `namespace`.
    ///
    /// Tries the exact namespace, then strips one trailing `/segment` at a
    /// time, and finally falls back to `__root__`. Without a root entry the
    /// result is [`LogConfig::inert`].
    pub fn resolve(&self, namespace: &str) -> LogConfig {
        let mut current = namespace;
        loop {
            if let Some(config) = self.loggers.get(current) {
                return config.clone();
            }
            match current.rfind('/') {
                Some(pos) => current = &current[..pos],
                None => break,
            }
        }

        self.loggers
            .get(ROOT_LOGGER)
            .cloned()
            .unwrap_or_else(LogConfig::inert)
    }

    pub fn logger(&self, namespace: &str) -> Option<&LogConfig> {
        self.loggers.get(namespace)
    }

    /// Appender configs ordered by id.
    pub fn appenders(&self) -> impl Iterator<Item = &AppenderConfig> {
        self.appenders.values()
    }

    pub fn appender(&self, id: &str) -> Option<&AppenderConfig> {
        self.appenders.get(id)
    }

    pub fn management(&self) -> Option<ManagementConfig> {
        self.management
    }
}
