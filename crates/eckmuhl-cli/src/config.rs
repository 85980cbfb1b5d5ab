//! Logging configuration read from the environment.
//!
//! The host has no configuration file: its only knobs are the log filter and
//! output format. Unusable values fall back to the defaults without comment
//! because stderr is reserved for the error line.

use std::env;

use strum::{Display, EnumString};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_FILTER_VAR: &str = "ECKMUHL_LOG";
/// Environment variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "ECKMUHL_LOG_FORMAT";
/// Filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Supported log output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable single line output.
    #[default]
    Compact,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    filter: String,
    format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl LogSettings {
    /// Reads the settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup(LOG_FILTER_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let format = lookup(LOG_FORMAT_VAR)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default();
        Self { filter, format }
    }

    /// The `EnvFilter` directive.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The output format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}
