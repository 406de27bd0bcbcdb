//! Output format selection
//!
//! - Logfmt: `key=value` pairs, one record per line
//! - Json: one JSON object per line (default)
//! - Nop: records are discarded

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding used by the sink behind the default context.
///
/// Numeric codes match the order `Logfmt = 0`, `Json = 1`, `Nop = 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Example: `level=info ts=2025-01-08T10:30:45.123456789Z caller=src/main.rs:10 msg=started`
    Logfmt = 0,

    /// Example: `{"caller":"src/main.rs:10","level":"info","msg":"started","ts":"..."}`
    #[default]
    Json = 1,

    Nop = 2,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Logfmt => "logfmt",
            LogFormat::Json => "json",
            LogFormat::Nop => "nop",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "logfmt" | "text" => Ok(LogFormat::Logfmt),
            "json" => Ok(LogFormat::Json),
            "nop" | "none" => Ok(LogFormat::Nop),
            _ => Err(LoggerError::invalid_format(s)),
        }
    }
}

impl TryFrom<&str> for LogFormat {
    type Error = LoggerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for LogFormat {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<i32> for LogFormat {
    type Error = LoggerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogFormat::Logfmt),
            1 => Ok(LogFormat::Json),
            2 => Ok(LogFormat::Nop),
            other => Err(LoggerError::invalid_format(other)),
        }
    }
}
