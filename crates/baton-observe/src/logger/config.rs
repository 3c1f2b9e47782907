use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

/// Environment variable selecting the output format.
pub const ENV_LOG_FORMAT: &str = "BATON_LOG_FORMAT";
/// Environment variable holding the filter directive (`info`, `baton_core=trace`, ...).
pub const ENV_LOG_LEVEL: &str = "BATON_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color: cfg!(test) || std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Defaults overridden by `BATON_LOG_FORMAT` and `BATON_LOG_LEVEL`.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`LoggerConfig::from_env`], reading from the given pairs.
    ///
    /// Unset or blank variables keep the default.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, LoggerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cfg = Self::default();
        for (key, value) in vars {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENV_LOG_FORMAT => cfg.format = value.parse()?,
                ENV_LOG_LEVEL => cfg.level = value.to_string(),
                _ => {}
            }
        }
        Ok(cfg)
    }
}
