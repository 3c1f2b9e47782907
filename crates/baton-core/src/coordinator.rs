//! # Completion coordinator.
//!
//! Resolves the [`RunOutcome`] of a run from whichever happens first:
//!
//! ```text
//! both workers terminated ──▶ all Done ? Completed : outcome of the cancel source
//! cancel source fired     ──▶ outcome of the cancel source (stragglers detached)
//! deadline elapsed        ──▶ expire the source ──▶ TimedOut (stragglers detached)
//! ```
//!
//! ## Rules
//! - Resolves **exactly once** per run
//! - Worker completion is checked first, so a run that finished its sequence is `Completed` even if
//!   cancellation fired in the same instant
//! - Never waits for workers after cancellation; they stop on their own at the next turn
//! - A worker error wins over the outcome; a panicked worker wins over a protocol violation

use baton_model::{Role, RunOutcome, SequenceBound, WorkerState};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::{cancel::CancelSource, error::PrinterError, worker::Worker};

/// Terminal record of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExit {
    pub role: Role,
    pub state: WorkerState,
    /// Number of values this worker emitted.
    pub emitted: u64,
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub bound: SequenceBound,
    pub outcome: RunOutcome,
    /// Exits observed before the outcome resolved.
    ///
    /// Empty when the run was cancelled before both workers terminated.
    pub workers: Vec<WorkerExit>,
}

impl RunReport {
    pub fn new(bound: SequenceBound, outcome: RunOutcome, workers: Vec<WorkerExit>) -> Self {
        Self {
            bound,
            outcome,
            workers,
        }
    }

    /// Values emitted by the observed workers.
    pub fn emitted(&self) -> u64 {
        self.workers.iter().map(|w| w.emitted).sum()
    }

    pub fn worker(&self, role: Role) -> Option<&WorkerExit> {
        self.workers.iter().find(|w| w.role == role)
    }
}

type WorkerHandle = JoinHandle<Result<WorkerExit, PrinterError>>;

pub(crate) struct Coordinator {
    bound: SequenceBound,
    odd: WorkerHandle,
    even: WorkerHandle,
}

impl Coordinator {
    /// Spawns both workers on the current runtime.
    pub(crate) fn spawn(bound: SequenceBound, odd: Worker, even: Worker) -> Self {
        debug_assert_eq!(odd.role(), Role::Odd);
        debug_assert_eq!(even.role(), Role::Even);
        Self {
            bound,
            odd: tokio::spawn(odd.run()),
            even: tokio::spawn(even.run()),
        }
    }

    pub(crate) async fn wait(self, source: &CancelSource) -> Result<RunReport, PrinterError> {
        let Coordinator { bound, odd, even } = self;

        let joined = async { tokio::join!(odd, even) };
        let deadline = async {
            match source.deadline() {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            (odd, even) = joined => {
                let workers = collect(flatten(Role::Odd, odd), flatten(Role::Even, even))?;
                let outcome = if workers.iter().all(|w| w.state == WorkerState::Done) {
                    RunOutcome::Completed
                } else {
                    source.outcome()
                };
                debug!(%outcome, "both workers terminated");
                Ok(RunReport::new(bound, outcome, workers))
            }
            _ = source.cancelled() => {
                let outcome = source.outcome();
                debug!(%outcome, "cancelled before both workers terminated");
                Ok(RunReport::new(bound, outcome, Vec::new()))
            }
            _ = deadline => {
                source.expire();
                let outcome = source.outcome();
                warn!(%outcome, "run deadline elapsed");
                Ok(RunReport::new(bound, outcome, Vec::new()))
            }
        }
    }
}

fn flatten(
    role: Role,
    res: Result<Result<WorkerExit, PrinterError>, JoinError>,
) -> Result<WorkerExit, PrinterError> {
    res.map_err(|e| PrinterError::WorkerAborted {
        role,
        reason: e.to_string(),
    })?
}

fn collect(
    odd: Result<WorkerExit, PrinterError>,
    even: Result<WorkerExit, PrinterError>,
) -> Result<Vec<WorkerExit>, PrinterError> {
    match (odd, even) {
        (Ok(odd), Ok(even)) => Ok(vec![odd, even]),
        (Err(e @ PrinterError::WorkerAborted { .. }), _)
        | (_, Err(e @ PrinterError::WorkerAborted { .. })) => Err(e),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}
