use std::sync::{Arc, OnceLock};
use std::time::Duration;

use baton_model::{CancelCause, RunOutcome};
use tokio::{task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::os_signals::wait_for_shutdown_signal;

/// Broadcast cancellation shared by both workers and the coordinator.
///
/// Any number of clones may observe it, any number of times. Firing is idempotent and the first
/// trigger decides the [`CancelCause`]: a deadline expiring after an explicit shutdown still reports
/// `Shutdown`, and the other way around.
#[derive(Clone, Debug, Default)]
pub struct CancelSource {
    token: CancellationToken,
    cause: Arc<OnceLock<CancelCause>>,
    deadline: Option<Instant>,
}

impl CancelSource {
    /// Source that fires only on [`CancelSource::cancel`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().with_deadline(Instant::now() + timeout)
    }

    /// Sets the instant at which the source expires.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Underlying token, for waiters that select on it directly.
    #[inline]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Requests shutdown.
    pub fn cancel(&self) {
        self.fire(CancelCause::Shutdown);
    }

    /// Marks the deadline as elapsed.
    pub fn expire(&self) {
        self.fire(CancelCause::Deadline);
    }

    /// Expires the source if its deadline has already passed; returns whether it has fired.
    pub fn check_deadline(&self) -> bool {
        if self.deadline.is_some_and(|at| at <= Instant::now()) {
            self.expire();
        }
        self.is_cancelled()
    }

    fn fire(&self, cause: CancelCause) {
        if self.cause.set(cause).is_ok() {
            debug!(?cause, "cancellation fired");
        }
        self.token.cancel();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Trigger that fired first, if any.
    pub fn cause(&self) -> Option<CancelCause> {
        self.cause.get().copied()
    }

    /// Outcome a run stopped by this source reports.
    ///
    /// A token cancelled directly (through a clone of [`CancelSource::token`]) counts as a shutdown.
    pub fn outcome(&self) -> RunOutcome {
        self.cause()
            .map(RunOutcome::from)
            .unwrap_or(RunOutcome::Cancelled)
    }

    /// Completes once the source has fired.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Spawns a listener that cancels this source on the first OS termination signal.
    ///
    /// The listener exits quietly if the source fires for another reason first.
    pub fn cancel_on_shutdown_signal(&self) -> JoinHandle<()> {
        let source = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                res = wait_for_shutdown_signal() => match res {
                    Ok(signal) => {
                        info!(signal, "shutdown signal received");
                        source.cancel();
                    }
                    Err(e) => warn!(error = %e, "failed to listen for shutdown signals"),
                },
                _ = source.cancelled() => {}
            }
        })
    }
}
