use serde::{Deserialize, Serialize};

/// Terminal result of one run, produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    /// Both workers emitted everything they own.
    Completed,
    /// A shutdown request stopped the run.
    Cancelled,
    /// The run deadline elapsed first.
    TimedOut,
}

impl RunOutcome {
    /// Returns `true` if the whole sequence was emitted.
    pub fn is_complete(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Cancelled => "cancelled",
            RunOutcome::TimedOut => "timed-out",
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What fired a cancellation source. The first trigger wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CancelCause {
    /// Explicit shutdown request (caller or OS signal).
    Shutdown,
    /// The deadline elapsed.
    Deadline,
}

impl From<CancelCause> for RunOutcome {
    fn from(cause: CancelCause) -> Self {
        match cause {
            CancelCause::Shutdown => RunOutcome::Cancelled,
            CancelCause::Deadline => RunOutcome::TimedOut,
        }
    }
}
