//! Alternating sequence printer.
//!
//! Two workers emit `1..=N` in strict order: the odd worker owns odd values, the even worker owns even
//! values. They take turns through two single-capacity hand-off slots and stop early when the shared
//! [`CancelSource`] fires (explicit shutdown or deadline).
//!
//! ```text
//!  initiator ──preload──▶ [odd-turn] ──▶ Odd worker ──emit 1,3,5..──▶ sink
//!                             ▲                │
//!                             │           pass │
//!                             │                ▼
//!          sink ◀──emit 2,4,6.. Even worker ◀── [even-turn]
//! ```
//!
//! The entry point is [`run`]; emissions reach callers through an [`EmissionSink`].

pub mod error;
pub use error::{ConfigError, PrinterError};

mod cancel;
pub use cancel::CancelSource;

mod os_signals;
pub use os_signals::wait_for_shutdown_signal;

pub mod signal;

mod worker;

mod coordinator;
pub use coordinator::{RunReport, WorkerExit};

pub mod sink;
pub use sink::{ChannelSink, EmissionSink, FnSink, Recorder};

mod config;
pub use config::RunConfig;

mod printer;
pub use printer::{run, run_with_config};
