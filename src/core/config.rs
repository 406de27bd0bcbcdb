//! Facade configuration
//!
//! `Config` can be built in code, deserialized with serde, or read from the
//! `LOG_FORMAT`, `LOG_OUTPUT` and `LOG_LEVEL` environment variables.

use super::{
    error::{LoggerError, Result},
    format::LogFormat,
    level::Level,
};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::LineWriter;
use std::path::{Path, PathBuf};

pub const ENV_FORMAT: &str = "LOG_FORMAT";
pub const ENV_OUTPUT: &str = "LOG_OUTPUT";
pub const ENV_LEVEL: &str = "LOG_LEVEL";

/// Where the default sink writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    /// Appended to, created if missing
    File(PathBuf),
}

impl Output {
    pub(crate) fn open_file(path: &Path) -> Result<LineWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log output",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        Ok(LineWriter::new(file))
    }
}

/// Settings applied by `init_with_config`.
///
/// # Example
///
/// ```
/// use leveled_logger::{Config, Level, LogFormat};
///
/// let config: Config = serde_json::from_str(r#"{"format":"logfmt","min_level":"info"}"#).unwrap();
/// assert_eq!(config.format, LogFormat::Logfmt);
/// assert_eq!(config.min_level, Level::Info);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: LogFormat,
    pub output: Output,
    pub min_level: Level,
}

impl Config {
    #[must_use]
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Read settings from the process environment; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(format) = lookup(ENV_FORMAT) {
            config.format = format.parse()?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            config.output = match output.trim() {
                "" => return Err(LoggerError::config(ENV_OUTPUT, "empty value")),
                "stdout" | "-" => Output::Stdout,
                "stderr" => Output::Stderr,
                path => Output::File(PathBuf::from(path)),
            };
        }
        if let Some(level) = lookup(ENV_LEVEL) {
            config.min_level = level.parse()?;
        }

        Ok(config)
    }
}
