//! Log output settings

use std::str::FromStr;

/// Environment variable selecting the log output format
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format '{}'", other)),
        }
    }
}

impl LogFormat {
    /// Read the format from the process environment.
    ///
    /// Logging starts before configuration is loaded, so an unknown value
    /// falls back to text instead of failing.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}
