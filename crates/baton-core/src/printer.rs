use std::sync::Arc;

use baton_model::{Role, SequenceBound};
use tracing::{debug, instrument};

use crate::{
    cancel::CancelSource,
    config::RunConfig,
    coordinator::{Coordinator, RunReport},
    error::PrinterError,
    signal::turn_slot,
    sink::EmissionSink,
    worker::Worker,
};

/// Prints `1..=bound` through `sink`, alternating between the odd and the even worker.
///
/// Returns once the outcome is known:
/// - `Completed` when both workers emitted everything they own
/// - `Cancelled` / `TimedOut` as soon as `source` fires (or its deadline elapses), without waiting
///   for the workers to wind down
///
/// A source that has already fired, or whose deadline has already passed, yields its outcome
/// without starting any worker.
/// Errors are reserved for broken hand-off invariants and aborted workers.
#[instrument(level = "debug", skip_all, fields(bound = %bound))]
pub async fn run(
    bound: SequenceBound,
    source: &CancelSource,
    sink: Arc<dyn EmissionSink>,
) -> Result<RunReport, PrinterError> {
    if source.check_deadline() {
        let outcome = source.outcome();
        debug!(%outcome, "source fired before start");
        return Ok(RunReport::new(bound, outcome, Vec::new()));
    }

    let (odd_tx, odd_rx) = turn_slot(Role::Odd);
    let (even_tx, even_rx) = turn_slot(Role::Even);

    // An empty run leaves both slots empty.
    if !bound.is_empty() {
        odd_tx.pass()?;
    }

    let token = source.token();
    let odd = Worker::new(Role::Odd, bound, odd_rx, even_tx, token.clone(), Arc::clone(&sink));
    let even = Worker::new(Role::Even, bound, even_rx, odd_tx, token.clone(), sink);

    let report = Coordinator::spawn(bound, odd, even).wait(source).await?;
    debug!(outcome = %report.outcome, emitted = report.emitted(), "run finished");
    Ok(report)
}

/// Runs with the bound and deadline of `cfg`.
pub async fn run_with_config(
    cfg: &RunConfig,
    sink: Arc<dyn EmissionSink>,
) -> Result<RunReport, PrinterError> {
    let source = cfg.cancel_source();
    run(cfg.bound(), &source, sink).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::time::Duration;

    use baton_model::{RunOutcome, WorkerState};

    use crate::sink::{ChannelSink, FnSink, Recorder};

    const GUARD: Duration = Duration::from_secs(10);

    async fn run_recorded(n: u64, source: &CancelSource) -> (RunReport, Recorder) {
        let rec = Recorder::new();
        let report = tokio::time::timeout(
            GUARD,
            run(SequenceBound::new(n), source, Arc::new(rec.clone())),
        )
        .await
        .expect("run did not finish in time")
        .expect("run failed");
        (report, rec)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn ten_in_strict_order() {
        let (report, rec) = run_recorded(10, &CancelSource::new()).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(rec.values(), (1..=10).collect::<Vec<_>>());
        assert_eq!(report.emitted(), 10);
        for w in &report.workers {
            assert_eq!(w.state, WorkerState::Done);
            assert_eq!(w.emitted, 5);
        }
    }

    #[tokio::test]
    async fn one_is_emitted_by_odd_alone() {
        let (report, rec) = run_recorded(1, &CancelSource::new()).await;

        assert_eq!(report.outcome, RunOutcome::Completed);
        let emitted = rec.snapshot();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].value, 1);
        assert_eq!(emitted[0].position, 1);
        assert_eq!(emitted[0].role, Role::Odd);
        assert_eq!(report.worker(Role::Even).map(|w| w.emitted), Some(0));
    }

    #[tokio::test]
    async fn empty_bound_completes_trivially() {
        let (report, rec) = run_recorded(0, &CancelSource::new()).await;
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(rec.is_empty());

        let rec = Recorder::new();
        let report = run(
            SequenceBound::from_signed(-3),
            &CancelSource::new(),
            Arc::new(rec.clone()),
        )
        .await
        .unwrap();
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert!(rec.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn parity_is_owned_by_role() {
        for n in [2, 7, 64, 101] {
            let (report, rec) = run_recorded(n, &CancelSource::new()).await;
            assert_eq!(report.outcome, RunOutcome::Completed);

            let emitted = rec.snapshot();
            assert!(emitted.iter().all(|e| e.role.owns(e.value)));

            let odd: Vec<u64> = emitted
                .iter()
                .filter(|e| e.role == Role::Odd)
                .map(|e| e.value)
                .collect();
            assert_eq!(odd, (1..=n).step_by(2).collect::<Vec<_>>());

            let even: Vec<u64> = emitted
                .iter()
                .filter(|e| e.role == Role::Even)
                .map(|e| e.value)
                .collect();
            assert_eq!(even, (2..=n).step_by(2).collect::<Vec<_>>());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_deadlock_across_bounds() {
        for n in 0..=512u64 {
            let (report, rec) = run_recorded(n, &CancelSource::new()).await;
            assert_eq!(report.outcome, RunOutcome::Completed, "n = {n}");
            assert_eq!(rec.len() as u64, n, "n = {n}");
            assert!(
                rec.snapshot().iter().all(|e| e.position == e.value),
                "n = {n}"
            );
        }
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let source = CancelSource::new();
        source.cancel();

        let (report, rec) = run_recorded(10, &source).await;
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert!(report.workers.is_empty());
        assert!(rec.is_empty());
    }

    #[tokio::test]
    async fn cancelling_twice_matches_once() {
        let once = CancelSource::new();
        once.cancel();
        let twice = CancelSource::new();
        twice.cancel();
        twice.cancel();

        let (a, _) = run_recorded(10, &once).await;
        let (b, _) = run_recorded(10, &twice).await;
        assert_eq!(a, b);
    }

    async fn cancel_at(value: u64, times: usize) -> (RunReport, Recorder) {
        let source = CancelSource::new();
        let rec = Recorder::new();
        let sink = {
            let source = source.clone();
            let rec = rec.clone();
            FnSink::new(move |e| {
                rec.emit(e);
                if e.value == value {
                    for _ in 0..times {
                        source.cancel();
                    }
                }
            })
        };

        let report = tokio::time::timeout(
            GUARD,
            run(SequenceBound::new(1_000), &source, Arc::new(sink)),
        )
        .await
        .expect("cancelled run must return promptly")
        .unwrap();
        (report, rec)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn repeated_cancel_mid_run_matches_single() {
        let (once, once_rec) = cancel_at(7, 1).await;
        let (twice, twice_rec) = cancel_at(7, 2).await;

        assert_eq!(once.outcome, RunOutcome::Cancelled);
        assert_eq!(twice.outcome, once.outcome);
        assert_eq!(once_rec.values(), (1..=7).collect::<Vec<_>>());
        assert_eq!(twice_rec.values(), once_rec.values());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancel_mid_sequence_stops_at_exact_prefix() {
        let source = CancelSource::new();
        let rec = Recorder::new();
        let sink = {
            let source = source.clone();
            let rec = rec.clone();
            FnSink::new(move |e| {
                rec.emit(e);
                if e.value == 100 {
                    source.cancel();
                }
            })
        };

        let report = tokio::time::timeout(
            GUARD,
            run(SequenceBound::new(1_000_000), &source, Arc::new(sink)),
        )
        .await
        .expect("cancelled run must return promptly")
        .unwrap();

        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(rec.values(), (1..=100).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn deadline_reports_timed_out() {
        let source = CancelSource::with_timeout(Duration::from_millis(20));
        let last = Arc::new(AtomicU64::new(0));
        let ordered = Arc::new(AtomicBool::new(true));
        let sink = {
            let last = Arc::clone(&last);
            let ordered = Arc::clone(&ordered);
            FnSink::new(move |e| {
                if last.swap(e.value, Ordering::SeqCst) + 1 != e.value {
                    ordered.store(false, Ordering::SeqCst);
                }
            })
        };

        let report = tokio::time::timeout(
            GUARD,
            run(SequenceBound::new(u64::MAX), &source, Arc::new(sink)),
        )
        .await
        .expect("deadline must stop the run")
        .unwrap();

        assert_eq!(report.outcome, RunOutcome::TimedOut);
        assert!(source.is_cancelled());
        assert!(ordered.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn elapsed_deadline_emits_nothing() {
        for _ in 0..200 {
            let source = CancelSource::with_timeout(Duration::ZERO);
            let (report, rec) = run_recorded(2, &source).await;

            assert_eq!(report.outcome, RunOutcome::TimedOut);
            assert!(report.workers.is_empty());
            assert!(rec.is_empty());
        }
    }

    #[tokio::test]
    async fn emissions_stream_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        let report = run(SequenceBound::new(6), &CancelSource::new(), Arc::new(sink))
            .await
            .unwrap();
        assert!(report.outcome.is_complete());

        let mut values = Vec::new();
        while let Ok(e) = rx.try_recv() {
            values.push(e.value);
        }
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn config_drives_run() {
        let rec = Recorder::new();
        let cfg = RunConfig::default().with_bound(4);
        let report = run_with_config(&cfg, Arc::new(rec.clone())).await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(rec.values(), vec![1, 2, 3, 4]);
    }
}
