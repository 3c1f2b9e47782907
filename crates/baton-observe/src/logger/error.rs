use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    InvalidFormat(String),

    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),

    #[error("journald output requires linux and the `journald` feature")]
    JournaldNotSupported,

    #[error("a global logger is already installed")]
    AlreadyInitialized,

    #[error("logger init failed: {0}")]
    InitializationFailed(String),
}
