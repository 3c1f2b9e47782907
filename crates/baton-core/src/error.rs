use baton_model::Role;
use thiserror::Error;

/// Fatal run errors.
///
/// Cancellation is never an error: it surfaces as [`baton_model::RunOutcome`].
#[derive(Debug, Error)]
pub enum PrinterError {
    /// The hand-off protocol broke an invariant (a turn with no consumer, or a turn after termination).
    #[error("protocol violation in {role} worker: {reason}")]
    ProtocolViolation { role: Role, reason: String },

    /// A worker task panicked or was aborted.
    #[error("{role} worker aborted: {reason}")]
    WorkerAborted { role: Role, reason: String },
}

impl PrinterError {
    pub(crate) fn violation(role: Role, reason: impl Into<String>) -> Self {
        PrinterError::ProtocolViolation {
            role,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
