//! Log level definitions
//!
//! Levels form a total order by rank. `All` and `Off` are sentinels sitting
//! below and above every emitting severity, so a threshold of `All` accepts
//! everything and a threshold of `Off` accepts nothing an emission method can
//! produce.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl LogLevel {
    /// Every level, in ascending rank order.
    pub const ALL_LEVELS: [LogLevel; 8] = [
        LogLevel::All,
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Off,
    ];

    /// Integer rank used for every threshold comparison.
    #[must_use]
    pub const fn rank(&self) -> i64 {
        match self {
            LogLevel::All => -(i64::MAX - 1),
            LogLevel::Trace => 0,
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 3,
            LogLevel::Error => 4,
            LogLevel::Fatal => 5,
            LogLevel::Off => i64::MAX,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::All => "ALL",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Off => "OFF",
        }
    }

    /// Look up a level by name, ignoring ASCII case.
    ///
    /// Only the eight canonical names match; there is no prefix matching.
    pub fn by_name(name: &str) -> Result<Self> {
        Self::ALL_LEVELS
            .iter()
            .copied()
            .find(|level| level.to_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    /// Look up a level by its exact rank.
    pub fn by_rank(rank: i64) -> Result<Self> {
        Self::ALL_LEVELS
            .iter()
            .copied()
            .find(|level| level.rank() == rank)
            .ok_or(LoggerError::UnknownLevelRank { rank })
    }

    /// True when an event at `self` passes a threshold of `threshold`.
    #[inline]
    #[must_use]
    pub fn passes(&self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }

    /// `ALL` and `OFF` only make sense as thresholds, never as an event level.
    #[inline]
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, LogLevel::All | LogLevel::Off)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::All | LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal | LogLevel::Off => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s)
    }
}

impl TryFrom<i64> for LogLevel {
    type Error = LoggerError;

    fn try_from(rank: i64) -> Result<Self> {
        Self::by_rank(rank)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(name: String) -> Result<Self> {
        Self::by_name(&name)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}
