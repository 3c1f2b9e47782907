//! Emission sinks.
//!
//! A sink receives every [`Emission`] in sequence order, called synchronously from the worker that
//! holds the turn. Sinks must not block for long: the peer worker waits for the hand-off.

use std::sync::{Arc, Mutex, PoisonError};

use baton_model::Emission;
use tokio::sync::mpsc;
use tracing::trace;

/// Observer of emitted values.
pub trait EmissionSink: Send + Sync {
    fn emit(&self, emission: Emission);
}

/// Keeps every emission in memory.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    inner: Arc<Mutex<Vec<Emission>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, in emission order.
    pub fn snapshot(&self) -> Vec<Emission> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded values, in emission order.
    pub fn values(&self) -> Vec<u64> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.value)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmissionSink for Recorder {
    fn emit(&self, emission: Emission) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(emission);
    }
}

/// Forwards emissions to an unbounded stream.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Emission>,
}

impl ChannelSink {
    /// Creates the sink together with the receiving end of the stream.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Emission>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EmissionSink for ChannelSink {
    fn emit(&self, emission: Emission) {
        if self.tx.send(emission).is_err() {
            trace!(value = emission.value, "emission stream closed; dropping");
        }
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(Emission) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> EmissionSink for FnSink<F>
where
    F: Fn(Emission) + Send + Sync,
{
    fn emit(&self, emission: Emission) {
        (self.0)(emission)
    }
}
