use serde::{Deserialize, Serialize};

/// Hand-off state of a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerState {
    /// Blocked until its turn arrives or the run is cancelled.
    Waiting,
    /// Holds the turn and is emitting its current value.
    Emitting,
    /// Handing the turn to the peer.
    Signaling,
    /// Emitted every value it owns.
    Done,
    /// Observed cancellation and stopped emitting.
    Cancelled,
}

impl WorkerState {
    /// Returns `true` if the worker won't transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Done | WorkerState::Cancelled)
    }
}
