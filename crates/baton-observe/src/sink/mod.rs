//! Emission and outcome logging for printer runs.

mod view;
pub use view::{log_report, message_for};

use std::sync::Arc;

use baton_core::EmissionSink;
use baton_model::Emission;
use tracing::info;

/// Sink that logs every emission before handing it to the wrapped sink.
#[derive(Clone)]
pub struct LogSink {
    next: Arc<dyn EmissionSink>,
}

impl LogSink {
    pub fn around(next: Arc<dyn EmissionSink>) -> Self {
        Self { next }
    }
}

impl EmissionSink for LogSink {
    fn emit(&self, emission: Emission) {
        info!(
            role = %emission.role,
            value = emission.value,
            position = emission.position,
            "emitted"
        );
        self.next.emit(emission);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Mutex, PoisonError},
    };

    use baton_core::{CancelSource, Recorder, RunReport, WorkerExit};
    use baton_model::{Role, RunOutcome, SequenceBound, WorkerState};
    use tracing_subscriber::fmt;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.text()
    }

    #[test]
    fn logs_and_forwards() {
        let rec = Recorder::new();
        let sink = LogSink::around(Arc::new(rec.clone()));

        let out = capture(|| sink.emit(Emission::new(Role::Even, 4)));
        assert!(out.contains("emitted"));
        assert!(out.contains("value=4"));
        assert!(out.contains("role=even"));
        assert_eq!(rec.values(), vec![4]);
    }

    #[test]
    fn completed_report_is_info() {
        let report = RunReport::new(
            SequenceBound::new(3),
            RunOutcome::Completed,
            vec![
                WorkerExit { role: Role::Odd, state: WorkerState::Done, emitted: 2 },
                WorkerExit { role: Role::Even, state: WorkerState::Done, emitted: 1 },
            ],
        );

        let out = capture(|| log_report(&report));
        assert!(out.contains("INFO"));
        assert!(out.contains(message_for(RunOutcome::Completed)));
        assert!(out.contains("emitted=3"));
        assert!(out.contains("worker exit"));
    }

    #[test]
    fn interrupted_reports_are_warnings() {
        for outcome in [RunOutcome::Cancelled, RunOutcome::TimedOut] {
            let report = RunReport::new(SequenceBound::new(10), outcome, Vec::new());
            let out = capture(|| log_report(&report));
            assert!(out.contains("WARN"), "{outcome}: {out}");
            assert!(out.contains(message_for(outcome)));
        }
    }

    #[tokio::test]
    async fn logs_a_whole_run() {
        let rec = Recorder::new();
        let sink: Arc<dyn EmissionSink> = Arc::new(LogSink::around(Arc::new(rec.clone())));

        let report = baton_core::run(SequenceBound::new(6), &CancelSource::new(), sink)
            .await
            .unwrap();
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(rec.values(), vec![1, 2, 3, 4, 5, 6]);
    }
}
