//! # One side of the alternating printer.
//!
//! A worker owns every value of its [`Role`]'s parity in `1..=N` and walks them in order:
//!
//! ```text
//! Waiting ──turn──▶ Emitting ──(v+1 ≤ N)──▶ Signaling ──▶ Waiting
//!    │                  │
//!    │ cancel           └──(v+1 > N)──▶ Done
//!    ▼
//! Cancelled ◀── cancel observed after the turn, before the emission
//! ```
//!
//! ## Rules
//! - Never emits without holding the turn
//! - Never hands off when the peer has no value left (`v + 1 > N`)
//! - A closed slot is a cancellation if the token fired, otherwise a protocol violation
//! - A turn still pending after `Done` is a protocol violation

use std::sync::Arc;

use baton_model::{Emission, Role, SequenceBound, WorkerState};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::{
    coordinator::WorkerExit,
    error::PrinterError,
    signal::{Pass, TurnReceiver, TurnSender, Wait},
    sink::EmissionSink,
};

pub(crate) struct Worker {
    role: Role,
    bound: SequenceBound,
    turn: TurnReceiver,
    handoff: TurnSender,
    cancel: CancellationToken,
    sink: Arc<dyn EmissionSink>,
    state: WorkerState,
    emitted: u64,
}

impl Worker {
    /// `turn` must be the slot owned by `role`, `handoff` the slot owned by its peer.
    pub(crate) fn new(
        role: Role,
        bound: SequenceBound,
        turn: TurnReceiver,
        handoff: TurnSender,
        cancel: CancellationToken,
        sink: Arc<dyn EmissionSink>,
    ) -> Self {
        debug_assert_eq!(turn.owner(), role);
        debug_assert_eq!(handoff.owner(), role.peer());
        Self {
            role,
            bound,
            turn,
            handoff,
            cancel,
            sink,
            state: WorkerState::Waiting,
            emitted: 0,
        }
    }

    #[inline]
    pub(crate) fn role(&self) -> Role {
        self.role
    }

    pub(crate) async fn run(mut self) -> Result<WorkerExit, PrinterError> {
        let n = self.bound.get();
        let mut cursor = self.role.first();

        while self.bound.contains(cursor) {
            self.transition(WorkerState::Waiting);
            match self.turn.wait(&self.cancel).await {
                Wait::Turn => {}
                Wait::Cancelled => return Ok(self.finish(WorkerState::Cancelled)),
                Wait::Closed => return self.closed("turn slot closed while waiting"),
            }
            if self.cancel.is_cancelled() {
                return Ok(self.finish(WorkerState::Cancelled));
            }

            self.transition(WorkerState::Emitting);
            self.sink.emit(Emission::new(self.role, cursor));
            self.emitted += 1;

            if cursor < n {
                self.transition(WorkerState::Signaling);
                if self.handoff.pass()? == Pass::Closed {
                    return self.closed("peer slot closed during hand-off");
                }
            }

            match cursor.checked_add(2) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        if self.turn.take_stray() {
            return Err(PrinterError::violation(
                self.role,
                "turn received after the final emission",
            ));
        }
        Ok(self.finish(WorkerState::Done))
    }

    fn transition(&mut self, next: WorkerState) {
        trace!(role = %self.role, from = ?self.state, to = ?next, "worker transition");
        self.state = next;
    }

    fn finish(&mut self, state: WorkerState) -> WorkerExit {
        self.transition(state);
        WorkerExit {
            role: self.role,
            state,
            emitted: self.emitted,
        }
    }

    fn closed(&mut self, reason: &str) -> Result<WorkerExit, PrinterError> {
        if self.cancel.is_cancelled() {
            return Ok(self.finish(WorkerState::Cancelled));
        }
        Err(PrinterError::violation(self.role, reason))
    }
}
