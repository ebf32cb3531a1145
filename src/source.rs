//! Configuration sources
//!
//! A [`ConfigSource`] produces the raw [`Properties`] bag the factory parses
//! on first use. [`FileSource`] reads a TOML file whose top-level tables are
//! the sections:
//!
//! ```toml
//! [appender]
//! app.type = "file"
//! app.path = "logs/app.log"
//! app.threshold = "INFO"
//!
//! [logger]
//! __root__ = "WARN, std"
//! "github.com/acme/api" = ["DEBUG", "std", "app"]
//!
//! [management]
//! port = 18080
//! service = true
//! ```
//!
//! Nested tables flatten into dotted keys, scalars are stringified and arrays
//! are joined with `", "`.

use crate::core::{LoggerError, Properties, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "log4r.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "LOG4R_CONFIG";

/// Where the factory gets its configuration from.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> Result<Properties>;
}

impl ConfigSource for Properties {
    fn load(&self) -> Result<Properties> {
        Ok(self.clone())
    }
}

impl<F> ConfigSource for F
where
    F: Fn() -> Result<Properties> + Send + Sync,
{
    fn load(&self) -> Result<Properties> {
        self()
    }
}

/// TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$LOG4R_CONFIG` if set, otherwise `log4r.toml` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<Properties> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            LoggerError::io_operation(
                "loading logger configuration",
                format!("cannot read '{}'", self.path.display()),
                e,
            )
        })?;
        parse_toml(&text)
    }
}

/// Parse TOML text into sections.
pub fn parse_toml(text: &str) -> Result<Properties> {
    let table: toml::Table = text.parse()?;
    let mut props = Properties::new();

    for (section, value) in &table {
        let toml::Value::Table(entries) = value else {
            return Err(LoggerError::config(
                "config source",
                format!("top-level key '{}' is not a section", section),
            ));
        };

        let mut flat = BTreeMap::new();
        flatten("", entries, &mut flat);
        for (key, value) in flat {
            props.set(section.as_str(), key, value);
        }
    }

    Ok(props)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            toml::Value::Table(nested) => flatten(&key, nested, out),
            other => {
                out.insert(key, scalar_text(other));
            }
        }
    }
}

fn scalar_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
