use std::time::Duration;

use baton_model::{SequenceBound, TimeoutMs};

use crate::{cancel::CancelSource, error::ConfigError};

const ENV_BOUND: &str = "BATON_BOUND";
const ENV_TIMEOUT_MS: &str = "BATON_TIMEOUT_MS";

const DEFAULT_BOUND: u64 = 10;

/// Parameters of one printer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Inclusive upper bound of the sequence.
    pub bound: u64,
    /// Run deadline; `None` runs until completion or shutdown.
    pub timeout_ms: Option<TimeoutMs>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            timeout_ms: None,
        }
    }
}

impl RunConfig {
    pub fn with_bound(mut self, bound: u64) -> Self {
        self.bound = bound;
        self
    }

    /// Sets the deadline; `0` disables it.
    pub fn with_timeout_ms(mut self, timeout_ms: TimeoutMs) -> Self {
        self.timeout_ms = (timeout_ms > 0).then_some(timeout_ms);
        self
    }

    #[inline]
    pub fn bound(&self) -> SequenceBound {
        SequenceBound::new(self.bound)
    }

    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Builds a fresh cancel source; the deadline, if any, starts now.
    pub fn cancel_source(&self) -> CancelSource {
        match self.timeout() {
            Some(timeout) => CancelSource::with_timeout(timeout),
            None => CancelSource::new(),
        }
    }

    /// Reads `BATON_BOUND` and `BATON_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`RunConfig::from_env`] over an explicit list of variables.
    ///
    /// Unset variables keep their defaults. A negative bound means an empty run.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cfg = Self::default();
        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                ENV_BOUND => cfg.bound = parse_bound(value)?,
                ENV_TIMEOUT_MS => {
                    let ms = value.parse::<TimeoutMs>().map_err(|_| invalid(ENV_TIMEOUT_MS, value))?;
                    cfg = cfg.with_timeout_ms(ms);
                }
                _ => {}
            }
        }
        Ok(cfg)
    }
}

fn parse_bound(value: &str) -> Result<u64, ConfigError> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(SequenceBound::from_signed(n).get());
    }
    value.parse::<u64>().map_err(|_| invalid(ENV_BOUND, value))
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}
