use baton_core::RunReport;
use baton_model::RunOutcome;
use tracing::{debug, info, warn};

#[inline]
pub fn message_for(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Completed => "sequence completed",
        RunOutcome::Cancelled => "run cancelled by shutdown request",
        RunOutcome::TimedOut => "run deadline elapsed before the sequence completed",
    }
}

/// Logs the outcome of a run; interrupted runs are reported at `warn`.
pub fn log_report(report: &RunReport) {
    let msg = message_for(report.outcome);
    let bound = report.bound.get();
    let emitted = report.emitted();

    match report.outcome {
        RunOutcome::Completed => info!(outcome = %report.outcome, bound, emitted, "{msg}"),
        RunOutcome::Cancelled | RunOutcome::TimedOut => {
            warn!(outcome = %report.outcome, bound, "{msg}")
        }
    }
    for exit in &report.workers {
        debug!(role = %exit.role, state = ?exit.state, emitted = exit.emitted, "worker exit");
    }
}
