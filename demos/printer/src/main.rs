use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use baton_core::{EmissionSink, FnSink, RunConfig};
use baton_model::Emission;
use baton_observe::{LogSink, LoggerConfig, log_report, logger_init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let log_cfg = LoggerConfig::from_env().context("logger config")?;
    logger_init(&log_cfg).context("logger init")?;

    // 2) Run config
    let cfg = RunConfig::from_env().context("run config")?;
    info!(
        bound = cfg.bound().get(),
        timeout_ms = cfg.timeout().map(|t| t.as_millis() as u64),
        "printer configured"
    );

    // 3) Cancellation: OS signal or deadline
    let source = cfg.cancel_source();
    let signals = source.cancel_on_shutdown_signal();

    // 4) Sink: stdout, logged on the way
    let stdout = FnSink::new(|e: Emission| println!("{}", e.value));
    let sink: Arc<dyn EmissionSink> = Arc::new(LogSink::around(Arc::new(stdout)));

    // 5) Run
    let report = baton_core::run(cfg.bound(), &source, sink).await?;
    log_report(&report);

    signals.abort();
    Ok(())
}
