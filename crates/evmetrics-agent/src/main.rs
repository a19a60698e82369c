//! evmetrics agent
//!
//! - Serves `/metrics` (default `0.0.0.0:8000`)
//! - Subscribes to a topic exchange with `*.*.*`, prefetch 1
//! - Counts each delivery by `(service, object_type, action)` and acks it
//!
//! Broker loss and bind failures end the process with a non-zero status;
//! restarting is left to the supervisor.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use evmetrics_agent::cli::Cli;
use evmetrics_agent::consumer::{AmqpSubscription, MessageProcessor};
use evmetrics_agent::{app_state::AppState, router};
use evmetrics_core::error::{EvMetricsError, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "evmetrics stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.resolve()?;
    let listen = cfg.metrics.listen_addr()?;
    let state = AppState::new(cfg)?;

    tracing::info!(%listen, "starting metrics server");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| EvMetricsError::Io(format!("bind {listen} failed: {e}")))?;
    let app = router::build_router(state.clone());
    let mut server = tokio::spawn(async move { axum::serve(listener, app).await });

    let dispatcher = state.dispatcher();
    let subscription = AmqpSubscription::connect(&state.cfg().amqp, &dispatcher.bindings()).await?;
    tracing::info!(queue = %subscription.queue(), "evmetrics running");
    let (consumer, _connection, _channel) = subscription.into_parts();
    let processor = MessageProcessor::new(dispatcher);

    tokio::select! {
        res = processor.run(consumer) => res,
        res = &mut server => match res {
            Ok(Ok(())) => Err(EvMetricsError::Io("metrics server exited".into())),
            Ok(Err(e)) => Err(EvMetricsError::Io(format!("metrics server failed: {e}"))),
            Err(e) => Err(EvMetricsError::Internal(format!("metrics server task: {e}"))),
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stopping consumption");
            Ok(())
        }
    }
}
