//! # Turn slots.
//!
//! A turn slot carries a valueless token from exactly one producer to exactly one consumer.
//! Capacity is one: a second token while the first is still pending means the producer raced ahead
//! of its peer, which the protocol never allows, so [`TurnSender::pass`] reports it as a
//! [`PrinterError::ProtocolViolation`] instead of queueing it.
//!
//! ## Rules
//! - The slot named after a role is consumed by that role and fed by its peer
//! - [`TurnReceiver::wait`] observes the turn and cancellation together; cancellation wins ties
//! - A token sent before the producer dropped its end is still delivered

use baton_model::Role;
use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tokio_util::sync::CancellationToken;

use crate::error::PrinterError;

/// Creates the slot through which `owner` receives its turn.
pub fn turn_slot(owner: Role) -> (TurnSender, TurnReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (TurnSender { owner, tx }, TurnReceiver { owner, rx })
}

/// Result of a hand-off attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// The token is waiting for the consumer.
    Delivered,
    /// The consumer is gone.
    Closed,
}

/// Result of waiting for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// The turn arrived.
    Turn,
    /// Cancellation was observed first.
    Cancelled,
    /// The producer is gone and no token is pending.
    Closed,
}

/// Producer end of a turn slot.
#[derive(Debug)]
pub struct TurnSender {
    owner: Role,
    tx: mpsc::Sender<()>,
}

impl TurnSender {
    /// Role that consumes this slot.
    #[inline]
    pub fn owner(&self) -> Role {
        self.owner
    }

    /// Hands the turn over without blocking.
    pub fn pass(&self) -> Result<Pass, PrinterError> {
        match self.tx.try_send(()) {
            Ok(()) => Ok(Pass::Delivered),
            Err(TrySendError::Closed(())) => Ok(Pass::Closed),
            Err(TrySendError::Full(())) => Err(PrinterError::violation(
                self.owner.peer(),
                format!("{} turn passed while the previous one is still pending", self.owner),
            )),
        }
    }
}

/// Consumer end of a turn slot.
#[derive(Debug)]
pub struct TurnReceiver {
    owner: Role,
    rx: mpsc::Receiver<()>,
}

impl TurnReceiver {
    #[inline]
    pub fn owner(&self) -> Role {
        self.owner
    }

    /// Waits for the turn or for `cancel`, whichever comes first.
    pub async fn wait(&mut self, cancel: &CancellationToken) -> Wait {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Wait::Cancelled,
            turn = self.rx.recv() => match turn {
                Some(()) => Wait::Turn,
                None => Wait::Closed,
            },
        }
    }

    /// Takes a pending token, if any. Returns `true` when one was waiting.
    pub fn take_stray(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
        }
    }
}
