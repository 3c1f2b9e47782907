mod bound;
pub use bound::SequenceBound;

mod role;
pub use role::Role;

mod worker_state;
pub use worker_state::WorkerState;

mod run_outcome;
pub use run_outcome::{CancelCause, RunOutcome};

mod emission;
pub use emission::Emission;

mod task;
pub use task::Task;

mod record_id;
pub use record_id::RecordId;

/// Timeout value in milliseconds.
///
/// Used in run configuration where an explicit time limit is required.
pub type TimeoutMs = u64;
